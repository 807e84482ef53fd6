//! Record-in, sentences-out pipeline.

use std::sync::atomic::{AtomicU8, Ordering};

use ais_models::{AisMessage, SentenceAddress, SentenceFields, SentenceFormatter};
use tracing::debug;

use crate::config::EncoderConfig;
use crate::error::CodecError;
use crate::{codec, nmea, sixbit};

/// Largest fragment count a sentence can announce.
const MAX_FRAGMENTS: usize = 9;

/// Turns [`AisMessage`] records into `!AIVDM` / `!AIVDO` sentences.
///
/// # Examples
///
/// ```
/// use ais_codec::{Decoder, Encoder, EncoderConfig};
///
/// let decoder = Decoder::default();
/// let message = decoder
///     .parse_one("!AIVDM,1,1,,A,13aEOn?P00PD3wVMdLDRhgvL289?,0*02")
///     .unwrap();
///
/// let encoder = Encoder::new(EncoderConfig::default());
/// let sentences = encoder.encode(&message).unwrap();
/// assert_eq!(sentences, ["!AIVDM,1,1,,A,13aEOn?P00PD3wVMdLDRhgvL289?,0*02\r\n"]);
/// ```
#[derive(Debug)]
pub struct Encoder {
    config: EncoderConfig,
    next_sequence_id: AtomicU8,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(EncoderConfig::default())
    }
}

impl Encoder {
    /// Encoder with the given settings.
    pub fn new(config: EncoderConfig) -> Self {
        Self {
            config,
            next_sequence_id: AtomicU8::new(0),
        }
    }

    /// The settings this encoder was built with.
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode a record into complete sentences (each ending in CRLF).
    pub fn encode(&self, message: &AisMessage) -> Result<Vec<String>, CodecError> {
        Ok(self
            .encode_fields(message)?
            .iter()
            .map(nmea::build)
            .collect())
    }

    /// Encode a record into sentence fields, one entry per sentence.
    ///
    /// Payloads longer than `max_fragment_chars` are split when
    /// fragmentation is enabled; only the final fragment carries fill bits.
    pub fn encode_fields(&self, message: &AisMessage) -> Result<Vec<SentenceFields>, CodecError> {
        self.config.validate()?;
        let bits = codec::encode(message)?;
        let armored = sixbit::encode(&bits);
        let fill_bits = sixbit::fill_bits(bits.len());

        let chunk_chars = self.config.max_fragment_chars;
        let chunks: Vec<&str> = if self.config.enable_fragmentation && armored.len() > chunk_chars {
            // armored text is ASCII, so byte offsets are character offsets
            armored
                .as_bytes()
                .chunks(chunk_chars)
                .filter_map(|chunk| std::str::from_utf8(chunk).ok())
                .collect()
        } else {
            vec![armored.as_str()]
        };
        if chunks.len() > MAX_FRAGMENTS {
            return Err(CodecError::domain(
                "payload",
                format!(
                    "{} characters need {} fragments, at most {MAX_FRAGMENTS} allowed",
                    armored.len(),
                    chunks.len()
                ),
            ));
        }

        let formatter = if self.config.own_vessel {
            SentenceFormatter::Vdo
        } else {
            SentenceFormatter::Vdm
        };
        let address = SentenceAddress::new(&self.config.talker, formatter);
        // at most MAX_FRAGMENTS, checked above
        #[allow(clippy::cast_possible_truncation)]
        let count = chunks.len() as u8;
        let sequence_id = if count > 1 {
            self.sequence_id().to_string()
        } else {
            String::new()
        };

        let fields: Vec<SentenceFields> = chunks
            .into_iter()
            .zip(1..=count)
            .map(|(payload, number)| SentenceFields {
                address: address.clone(),
                fragment_count: count,
                fragment_number: number,
                sequence_id: sequence_id.clone(),
                channel: Some(self.config.channel),
                payload: payload.to_string(),
                fill_bits: if number == count { fill_bits } else { 0 },
                checksum: None,
                tag_block: None,
            })
            .collect();
        debug!(
            message_type = message.message_type(),
            mmsi = message.mmsi(),
            bits = bits.len(),
            sentences = fields.len(),
            "encoded message"
        );
        Ok(fields)
    }

    /// The configured sequence id, or the next one in the `0..=9` rotation.
    fn sequence_id(&self) -> u8 {
        if let Some(id) = self.config.sequence_id {
            return id;
        }
        self.next_sequence_id
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |id| Some((id + 1) % 10))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use ais_models::{Dimensions, EpfdType, Eta, Header, StaticVoyageData};

    use super::*;
    use crate::config::DecoderConfig;
    use crate::decoder::Decoder;

    const TYPE1: &str = "!AIVDM,1,1,,A,13aEOn?P00PD3wVMdLDRhgvL289?,0*02";

    fn ever_diadem() -> AisMessage {
        AisMessage::StaticVoyageData(StaticVoyageData {
            header: Header::new(351_759_000),
            ais_version: 0,
            imo: 9_134_270,
            callsign: "3FOF8".into(),
            vessel_name: "EVER DIADEM".into(),
            ship_type: 70,
            dimensions: Dimensions {
                to_bow: 225,
                to_stern: 70,
                to_port: 1,
                to_starboard: 31,
            },
            epfd: EpfdType::Gps,
            eta: Eta {
                month: 5,
                day: 15,
                hour: 14,
                minute: 0,
            },
            draught: 12.2,
            destination: "NEW YORK".into(),
            dte: false,
        })
    }

    #[test]
    fn single_sentence_matches_reference() {
        let message = Decoder::default().parse_one(TYPE1).unwrap();
        let sentences = Encoder::default().encode(&message).unwrap();
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0], format!("{TYPE1}\r\n"));
        assert!(nmea::validate(&sentences[0]));
    }

    #[test]
    fn long_payload_is_fragmented() {
        let encoder = Encoder::new(EncoderConfig {
            sequence_id: Some(1),
            ..EncoderConfig::default()
        });
        let fields = encoder.encode_fields(&ever_diadem()).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].payload.len(), 60);
        assert_eq!(fields[1].payload.len(), 11);
        assert_eq!(fields[0].fill_bits, 0);
        assert_eq!(fields[1].fill_bits, 2);
        for (i, f) in fields.iter().enumerate() {
            assert_eq!(f.fragment_count, 2);
            assert_eq!(usize::from(f.fragment_number), i + 1);
            assert_eq!(f.sequence_id, "1");
        }
        let sentences = encoder.encode(&ever_diadem()).unwrap();
        assert!(sentences[0].starts_with("!AIVDM,2,1,1,A,55?MbV02;H;s"));
        assert!(sentences[1].starts_with("!AIVDM,2,2,1,A,"));
        assert!(sentences.iter().all(|s| nmea::validate(s) && s.ends_with("\r\n")));
    }

    #[test]
    fn fragments_decode_back() {
        let encoder = Encoder::new(EncoderConfig {
            max_fragment_chars: 15,
            ..EncoderConfig::default()
        });
        let sentences = encoder.encode(&ever_diadem()).unwrap();
        assert_eq!(sentences.len(), 5);

        let decoder = Decoder::new(DecoderConfig::default());
        let decoded = decoder.parse_batch(sentences.iter().rev());
        assert_eq!(decoded, [ever_diadem()]);
    }

    #[test]
    fn fragmentation_disabled_keeps_one_sentence() {
        let encoder = Encoder::new(EncoderConfig {
            enable_fragmentation: false,
            ..EncoderConfig::default()
        });
        let fields = encoder.encode_fields(&ever_diadem()).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].payload.len(), 71);
        assert_eq!(fields[0].fill_bits, 2);
        assert_eq!(fields[0].sequence_id, "");
    }

    #[test]
    fn sequence_ids_rotate() {
        let encoder = Encoder::default();
        let ids: Vec<String> = (0..12)
            .map(|_| encoder.encode_fields(&ever_diadem()).unwrap()[0].sequence_id.clone())
            .collect();
        assert_eq!(ids[0], "0");
        assert_eq!(ids[9], "9");
        assert_eq!(ids[10], "0");
        assert_eq!(ids[11], "1");
    }

    #[test]
    fn own_vessel_talker_and_channel() {
        let encoder = Encoder::new(EncoderConfig {
            own_vessel: true,
            talker: "BS".into(),
            channel: 'B',
            ..EncoderConfig::default()
        });
        let message = Decoder::default().parse_one(TYPE1).unwrap();
        let sentence = encoder.encode(&message).unwrap().remove(0);
        assert!(sentence.starts_with("!BSVDO,1,1,,B,"));
        assert!(nmea::validate(&sentence));

        let decoded = Decoder::default().parse_sentence(&sentence).unwrap();
        assert!(decoded.own_vessel);
        assert_eq!(decoded.message, message);
    }

    #[test]
    fn too_many_fragments_is_an_error() {
        let encoder = Encoder::new(EncoderConfig {
            max_fragment_chars: 5,
            ..EncoderConfig::default()
        });
        assert!(matches!(
            encoder.encode(&ever_diadem()),
            Err(CodecError::InvalidEncodeDomain { field: "payload", .. })
        ));
    }

    #[test]
    fn unparsable_sentence_settings_are_rejected() {
        let message = Decoder::default().parse_one(TYPE1).unwrap();
        for config in [
            EncoderConfig {
                channel: ',',
                ..EncoderConfig::default()
            },
            EncoderConfig {
                channel: '*',
                ..EncoderConfig::default()
            },
            EncoderConfig {
                sequence_id: Some(12),
                ..EncoderConfig::default()
            },
        ] {
            assert!(matches!(
                Encoder::new(config).encode(&message),
                Err(CodecError::InvalidEncodeDomain { .. })
            ));
        }
    }

    #[test]
    fn encode_errors_surface() {
        let message = AisMessage::Unknown {
            message_type: 1,
            header: Header::new(1),
        };
        assert!(Encoder::default().encode(&message).is_err());
    }
}
