//! NMEA 0183 sentence fields for AIS (`!AIVDM` / `!AIVDO`).
//!
//! ```text
//! !AIVDM,<count>,<number>,<seqid>,<channel>,<payload>,<fill>*<hh>
//!  ^^    talker id
//!    ^^^ formatter: VDM = other vessel, VDO = own vessel
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

// ---------------------------------------------------------------------------
// SentenceFormatter
// ---------------------------------------------------------------------------

/// The three-letter sentence formatter following the talker id.
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "UPPERCASE")]
pub enum SentenceFormatter {
    /// VHF data-link message received from another station.
    #[default]
    Vdm,
    /// VHF data-link own-vessel report.
    Vdo,
}

// ---------------------------------------------------------------------------
// SentenceAddress
// ---------------------------------------------------------------------------

/// The address field of an AIS sentence, e.g. `AIVDM` or `BSVDO`.
///
/// # Examples
///
/// ```
/// use ais_models::{SentenceAddress, SentenceFormatter};
///
/// let address: SentenceAddress = "AIVDO".parse().unwrap();
/// assert_eq!(address.talker(), "AI");
/// assert_eq!(address.formatter, SentenceFormatter::Vdo);
/// assert_eq!(address.to_string(), "AIVDO");
///
/// assert!("GPGGA".parse::<SentenceAddress>().is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SentenceAddress {
    talker: String,
    /// VDM or VDO.
    pub formatter: SentenceFormatter,
}

impl SentenceAddress {
    /// Build an address from a talker id; only the first two characters are
    /// kept, missing characters default to `AI`.
    pub fn new(talker: &str, formatter: SentenceFormatter) -> Self {
        let talker: String = talker.chars().take(2).collect();
        let talker = if talker.len() == 2 {
            talker.to_ascii_uppercase()
        } else {
            "AI".to_string()
        };
        Self { talker, formatter }
    }

    /// The two-character talker id.
    pub fn talker(&self) -> &str {
        &self.talker
    }

    /// `true` for own-vessel (`VDO`) sentences.
    pub fn own_vessel(&self) -> bool {
        self.formatter == SentenceFormatter::Vdo
    }
}

impl Default for SentenceAddress {
    fn default() -> Self {
        Self::new("AI", SentenceFormatter::Vdm)
    }
}

impl fmt::Display for SentenceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.talker, self.formatter)
    }
}

impl FromStr for SentenceAddress {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 5 || !s.is_ascii() {
            return Err(ModelError::InvalidAddress {
                value: s.to_string(),
                reason: "must be a 2-character talker followed by VDM or VDO".to_string(),
            });
        }
        let (talker, formatter) = s.split_at(2);
        let formatter = formatter
            .parse::<SentenceFormatter>()
            .map_err(|_| ModelError::InvalidAddress {
                value: s.to_string(),
                reason: "unsupported sentence formatter".to_string(),
            })?;
        Ok(Self::new(talker, formatter))
    }
}

// ---------------------------------------------------------------------------
// Channel
// ---------------------------------------------------------------------------

/// Parse the radio channel field: empty means "not given", otherwise exactly
/// one printable ASCII character (`A`, `B`, `1`, `2`, ...).
///
/// # Examples
///
/// ```
/// use ais_models::parse_channel;
///
/// assert_eq!(parse_channel("B").unwrap(), Some('B'));
/// assert_eq!(parse_channel("").unwrap(), None);
/// assert!(parse_channel("AB").is_err());
/// ```
pub fn parse_channel(field: &str) -> Result<Option<char>, ModelError> {
    let mut chars = field.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(c), None) if c.is_ascii_graphic() => Ok(Some(c)),
        _ => Err(ModelError::InvalidChannel {
            value: field.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// SentenceFields
// ---------------------------------------------------------------------------

/// The comma-delimited fields of one AIS sentence.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SentenceFields {
    /// Talker id and formatter.
    pub address: SentenceAddress,
    /// Total number of sentences carrying the message (1 for single-part).
    pub fragment_count: u8,
    /// 1-based position of this sentence within the message.
    pub fragment_number: u8,
    /// Sequential message id linking the fragments of one message; may be empty.
    pub sequence_id: String,
    /// Radio channel, when given.
    pub channel: Option<char>,
    /// 6-bit armored payload.
    pub payload: String,
    /// Number of padding bits appended to the payload (0–5).
    pub fill_bits: u8,
    /// Checksum as transmitted, when present.
    pub checksum: Option<u8>,
    /// NMEA 4.0 tag block preceding the sentence, without its delimiters.
    pub tag_block: Option<String>,
}

impl SentenceFields {
    /// Fields for a single-sentence `!AIVDM` message.
    pub fn single(payload: impl Into<String>, fill_bits: u8, channel: Option<char>) -> Self {
        Self {
            address: SentenceAddress::default(),
            fragment_count: 1,
            fragment_number: 1,
            sequence_id: String::new(),
            channel,
            payload: payload.into(),
            fill_bits,
            checksum: None,
            tag_block: None,
        }
    }

    /// `true` when the message spans more than one sentence.
    pub fn is_multipart(&self) -> bool {
        self.fragment_count > 1
    }

    /// `true` for own-vessel (`VDO`) sentences.
    pub fn own_vessel(&self) -> bool {
        self.address.own_vessel()
    }

    /// `true` for the final sentence of a message.
    pub fn is_last_fragment(&self) -> bool {
        self.fragment_number == self.fragment_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_parse_and_display() {
        let address: SentenceAddress = "BSVDM".parse().unwrap();
        assert_eq!(address.talker(), "BS");
        assert!(!address.own_vessel());
        assert_eq!(address.to_string(), "BSVDM");
    }

    #[test]
    fn address_rejects_other_formatters() {
        let err = "GPGGA".parse::<SentenceAddress>().unwrap_err();
        assert!(matches!(err, ModelError::InvalidAddress { .. }));
        assert!("AIVD".parse::<SentenceAddress>().is_err());
    }

    #[test]
    fn address_new_defaults_short_talker() {
        let address = SentenceAddress::new("x", SentenceFormatter::Vdo);
        assert_eq!(address.to_string(), "AIVDO");
    }

    #[test]
    fn channel_parsing() {
        assert_eq!(parse_channel("A").unwrap(), Some('A'));
        assert_eq!(parse_channel("2").unwrap(), Some('2'));
        assert!(parse_channel(" ").is_err());
    }

    #[test]
    fn single_fields() {
        let fields = SentenceFields::single("13aEOn?P00PD3wVMdLDRhgvL289?", 0, Some('A'));
        assert!(!fields.is_multipart());
        assert!(fields.is_last_fragment());
        assert!(!fields.own_vessel());
    }
}
