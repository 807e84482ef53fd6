//! Sentence-in, record-out pipeline.
//!
//! ```text
//! line ─► nmea::parse ─► (multipart?) MultipartReassembler ─► sixbit::decode
//!                                                               │
//!                                   AisMessage ◄─ codec::decode ◄┘ (fill bits trimmed)
//! ```
//!
//! A [`Decoder`] never fails a batch because of one bad line: every error is
//! logged, counted and turned into "no record".

use std::sync::atomic::{AtomicU64, Ordering};

use ais_models::{AisMessage, SentenceFields};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::DecoderConfig;
use crate::error::CodecError;
use crate::reassembly::{FragmentKey, MultipartReassembler};
use crate::{codec, nmea, sixbit};

// ---------------------------------------------------------------------------
// DecodedSentence
// ---------------------------------------------------------------------------

/// A decoded message together with what the carrying sentence said about it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSentence {
    /// The decoded record.
    pub message: AisMessage,
    /// `true` when the message came in `VDO` (own vessel) sentences.
    pub own_vessel: bool,
    /// Radio channel of the final sentence.
    pub channel: Option<char>,
    /// Receive time from the tag block `c:` parameter, when present.
    pub received_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// DecoderStats
// ---------------------------------------------------------------------------

/// Snapshot of a decoder's counters.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecoderStats {
    /// Lines handed to the decoder.
    pub sentences: u64,
    /// Records produced.
    pub decoded: u64,
    /// Fragments accepted while their message was still incomplete.
    pub pending: u64,
    /// Lines dropped for a wrong checksum.
    pub checksum_failures: u64,
    /// Lines dropped as malformed or carrying an unsupported layout.
    pub malformed: u64,
    /// Messages dropped because a field ran past the payload.
    pub truncated: u64,
}

#[derive(Debug, Default)]
struct Counters {
    sentences: AtomicU64,
    decoded: AtomicU64,
    pending: AtomicU64,
    checksum_failures: AtomicU64,
    malformed: AtomicU64,
    truncated: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> DecoderStats {
        DecoderStats {
            sentences: self.sentences.load(Ordering::Relaxed),
            decoded: self.decoded.load(Ordering::Relaxed),
            pending: self.pending.load(Ordering::Relaxed),
            checksum_failures: self.checksum_failures.load(Ordering::Relaxed),
            malformed: self.malformed.load(Ordering::Relaxed),
            truncated: self.truncated.load(Ordering::Relaxed),
        }
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// Turns raw sentence lines into [`AisMessage`] records.
///
/// The decoder owns its [`MultipartReassembler`]; it is `Sync`, so one
/// instance can be shared by several reader threads.
///
/// # Examples
///
/// ```
/// use ais_codec::{Decoder, DecoderConfig};
///
/// let decoder = Decoder::new(DecoderConfig::default());
/// let message = decoder
///     .parse_one("!AIVDM,1,1,,A,13aEOn?P00PD3wVMdLDRhgvL289?,0*02")
///     .unwrap();
/// assert_eq!(message.mmsi(), 244_670_424);
///
/// // Fragments are buffered until the message is complete.
/// assert!(decoder
///     .parse_one("!AIVDM,2,1,1,A,55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8,0*1C")
///     .is_none());
/// let voyage = decoder.parse_one("!AIVDM,2,2,1,A,88888888880,2*25").unwrap();
/// assert_eq!(voyage.name(), Some("EVER DIADEM"));
/// ```
#[derive(Debug)]
pub struct Decoder {
    config: DecoderConfig,
    reassembler: MultipartReassembler,
    counters: Counters,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(DecoderConfig::default())
    }
}

impl Decoder {
    /// Decoder with the given settings.
    pub fn new(config: DecoderConfig) -> Self {
        let reassembler = MultipartReassembler::new(config.max_reassembly_age_seconds);
        Self {
            config,
            reassembler,
            counters: Counters::default(),
        }
    }

    /// The settings this decoder was built with.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// The multipart table, for housekeeping (`pending`, `clear`, eviction).
    pub fn reassembler(&self) -> &MultipartReassembler {
        &self.reassembler
    }

    /// Counter snapshot.
    pub fn stats(&self) -> DecoderStats {
        self.counters.snapshot()
    }

    /// Decode one line, reporting why no record was produced.
    ///
    /// A fragment of an incomplete multipart message yields
    /// [`CodecError::IncompleteMultipart`]; feed the remaining fragments to
    /// the same decoder to complete it. With reassembly disabled, every
    /// fragment is decoded on its own.
    pub fn decode_sentence(&self, line: &str) -> Result<DecodedSentence, CodecError> {
        let fields = nmea::parse(line, self.config.validate_checksum)?;

        let (payload, fill_bits) = if fields.is_multipart() && self.config.enable_reassembly {
            let key = FragmentKey::new(fields.sequence_id.clone(), fields.channel, fields.fragment_count);
            let received = self.reassembler.add_fragment(
                &key,
                fields.fragment_number,
                &fields.payload,
                fields.fill_bits,
            );
            match self.reassembler.reassemble(&key) {
                Some(message) => (message.payload, message.fill_bits),
                None => {
                    return Err(CodecError::IncompleteMultipart {
                        received,
                        total: fields.fragment_count,
                    })
                }
            }
        } else {
            (fields.payload.clone(), fields.fill_bits)
        };

        let message = decode_payload(&payload, fill_bits)?;
        Ok(self.wrap(message, &fields))
    }

    fn wrap(&self, message: AisMessage, fields: &SentenceFields) -> DecodedSentence {
        debug!(
            message_type = message.message_type(),
            mmsi = message.mmsi(),
            channel = ?fields.channel,
            "decoded message"
        );
        Counters::bump(&self.counters.decoded);
        DecodedSentence {
            message,
            own_vessel: fields.own_vessel(),
            channel: fields.channel,
            received_at: fields.tag_block.as_deref().and_then(nmea::tag_block_time),
        }
    }

    /// Decode one line; `None` when it is pending, corrupt or undecodable.
    pub fn parse_sentence(&self, line: &str) -> Option<DecodedSentence> {
        Counters::bump(&self.counters.sentences);
        match self.decode_sentence(line) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                self.record_failure(line, &err);
                None
            }
        }
    }

    /// Decode one line into its record.
    pub fn parse_one(&self, line: &str) -> Option<AisMessage> {
        self.parse_sentence(line).map(|d| d.message)
    }

    /// Decode lines in order, keeping only the records produced.
    pub fn parse_batch<I, S>(&self, lines: I) -> Vec<AisMessage>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter_map(|line| self.parse_one(line.as_ref()))
            .collect()
    }

    fn record_failure(&self, line: &str, err: &CodecError) {
        let line = line.trim();
        match err {
            CodecError::IncompleteMultipart { received, total } => {
                Counters::bump(&self.counters.pending);
                debug!(received, total, "multipart message pending");
            }
            CodecError::ChecksumMismatch { .. } => {
                Counters::bump(&self.counters.checksum_failures);
                warn!(%err, line, "dropping sentence");
            }
            CodecError::TruncatedPayload { .. } => {
                Counters::bump(&self.counters.truncated);
                warn!(%err, line, "dropping sentence");
            }
            _ => {
                Counters::bump(&self.counters.malformed);
                warn!(%err, line, "dropping sentence");
            }
        }
    }
}

/// Decode a complete armored payload whose last `fill_bits` bits are padding.
pub fn decode_payload(payload: &str, fill_bits: u8) -> Result<AisMessage, CodecError> {
    let mut bits = sixbit::decode(payload);
    bits.truncate(bits.len().saturating_sub(usize::from(fill_bits)));
    codec::decode(&bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPE1_FIXTURE: &str = "!AIVDM,1,1,,A,13aEOn?P00PD3wVMdLDRhgvL289?,0*26";
    const TYPE1: &str = "!AIVDM,1,1,,A,13aEOn?P00PD3wVMdLDRhgvL289?,0*02";

    const TYPE5_FIVE_PARTS: [&str; 5] = [
        "!AIVDM,5,1,3,B,55?MbV02;H;s<Ht,0*6D",
        "!AIVDM,5,2,3,B,KP00EHE:0@T4@Dl,0*00",
        "!AIVDM,5,3,3,B,0000000016L961O,0*2A",
        "!AIVDM,5,4,3,B,5Gf0NSQEp6ClRh0,0*59",
        "!AIVDM,5,5,3,B,00000000000,2*24",
    ];

    const TYPE5_TWO_PARTS: [&str; 2] = [
        "!AIVDM,2,1,1,A,55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8,0*1C",
        "!AIVDM,2,2,1,A,88888888880,2*25",
    ];

    fn lenient() -> Decoder {
        Decoder::new(DecoderConfig {
            validate_checksum: false,
            ..DecoderConfig::default()
        })
    }

    fn assert_ever_diadem(message: &AisMessage) {
        let AisMessage::StaticVoyageData(data) = message else {
            panic!("expected static and voyage data, got {message:?}");
        };
        assert_eq!(data.header.mmsi, 351_759_000);
        assert_eq!(data.imo, 9_134_270);
        assert_eq!(data.callsign, "3FOF8");
        assert_eq!(data.vessel_name, "EVER DIADEM");
        assert_eq!(data.destination, "NEW YORK");
        assert_eq!(data.ship_type, 70);
        assert!((data.draught - 12.2).abs() < 1e-9);
    }

    #[test]
    fn fixture_with_stale_checksum_needs_lenient_mode() {
        let strict = Decoder::default();
        assert_eq!(
            strict.decode_sentence(TYPE1_FIXTURE),
            Err(CodecError::ChecksumMismatch {
                expected: 0x26,
                computed: 0x02
            })
        );
        assert!(strict.parse_one(TYPE1_FIXTURE).is_none());
        assert_eq!(strict.stats().checksum_failures, 1);

        let message = lenient().parse_one(TYPE1_FIXTURE).unwrap();
        let AisMessage::PositionReportScheduled(report) = message else {
            panic!("expected a type 1 report");
        };
        assert_eq!(report.header.mmsi, 244_670_424);
        assert_eq!(report.true_heading, 511);
        assert!((report.course_over_ground - 70.6).abs() < 1e-9);
    }

    #[test]
    fn valid_single_sentence() {
        let decoder = Decoder::default();
        let decoded = decoder.parse_sentence(TYPE1).unwrap();
        assert_eq!(decoded.message.message_type(), 1);
        assert_eq!(decoded.channel, Some('A'));
        assert!(!decoded.own_vessel);
        assert!(decoded.received_at.is_none());
    }

    #[test]
    fn five_fragments_in_order() {
        let decoder = Decoder::default();
        for line in &TYPE5_FIVE_PARTS[..4] {
            assert!(decoder.parse_one(line).is_none());
        }
        assert_eq!(decoder.reassembler().pending(), 1);
        let message = decoder.parse_one(TYPE5_FIVE_PARTS[4]).unwrap();
        assert_ever_diadem(&message);
        assert_eq!(decoder.reassembler().pending(), 0);

        let stats = decoder.stats();
        assert_eq!(stats.sentences, 5);
        assert_eq!(stats.pending, 4);
        assert_eq!(stats.decoded, 1);
    }

    #[test]
    fn fragments_out_of_order() {
        let decoder = Decoder::default();
        assert_eq!(
            decoder.decode_sentence(TYPE5_TWO_PARTS[1]),
            Err(CodecError::IncompleteMultipart {
                received: 1,
                total: 2
            })
        );
        let message = decoder.parse_one(TYPE5_TWO_PARTS[0]).unwrap();
        assert_ever_diadem(&message);
    }

    #[test]
    fn batch_skips_corrupt_lines_and_keeps_order() {
        let decoder = Decoder::default();
        let mut lines = vec![
            "garbage".to_string(),
            TYPE1.to_string(),
            TYPE1_FIXTURE.to_string(),
            "!AIVDM,1,1,,A,13aEOn?P00PD,0*5A".to_string(),
            String::new(),
        ];
        lines.extend(TYPE5_FIVE_PARTS.iter().map(ToString::to_string));
        lines.push("!AIVDM,1,1,,B,13aEOn?P00PD3wVMdLDRhgvL289?,0*01".to_string());

        let messages = decoder.parse_batch(&lines);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].message_type(), 1);
        assert_ever_diadem(&messages[1]);
        assert_eq!(messages[2].message_type(), 1);

        let stats = decoder.stats();
        assert_eq!(stats.sentences, 11);
        assert_eq!(stats.checksum_failures, 1);
        assert_eq!(stats.truncated, 1);
        assert_eq!(stats.malformed, 2);
    }

    #[test]
    fn fill_bits_of_last_fragment_are_trimmed() {
        let decoder = Decoder::default();
        decoder.parse_one(TYPE5_TWO_PARTS[0]);
        let message = decoder.parse_one(TYPE5_TWO_PARTS[1]).unwrap();
        let AisMessage::StaticVoyageData(data) = message else {
            panic!("expected static and voyage data");
        };
        assert!(!data.dte);
        assert_eq!(data.eta.month, 5);
    }

    #[test]
    fn reassembly_disabled_decodes_fragments_alone() {
        let decoder = Decoder::new(DecoderConfig {
            enable_reassembly: false,
            ..DecoderConfig::default()
        });
        assert!(matches!(
            decoder.decode_sentence(TYPE5_FIVE_PARTS[0]),
            Err(CodecError::TruncatedPayload { .. })
        ));
        assert_eq!(decoder.reassembler().pending(), 0);
    }

    #[test]
    fn own_vessel_and_tag_block_time() {
        let decoder = Decoder::default();
        let line = "\\s:2573135,c:1671620143*0B\\!AIVDO,1,1,,B,13aEOn?P00PD3wVMdLDRhgvL289?,0*03";
        let decoded = decoder.parse_sentence(line).unwrap();
        assert!(decoded.own_vessel);
        assert_eq!(decoded.channel, Some('B'));
        assert_eq!(decoded.received_at.map(|t| t.timestamp()), Some(1_671_620_143));
    }

    #[test]
    fn decode_payload_directly() {
        let message = decode_payload("13aEOn?P00PD3wVMdLDRhgvL289?", 0).unwrap();
        assert_eq!(message.mmsi(), 244_670_424);
        assert!(decode_payload("", 0).is_err());
    }

    #[test]
    fn decoder_is_shareable_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<Decoder>();
    }
}
