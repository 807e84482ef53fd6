//! Decoder and encoder configuration.
//!
//! Both structs have sensible defaults, deserialize from any serde format an
//! external loader prefers, and can be read from `AIS_*` environment
//! variables at startup. A variable that is missing or does not parse keeps
//! the default.

use serde::Deserialize;

use crate::error::CodecError;

/// Settings for [`Decoder`](crate::Decoder).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DecoderConfig {
    /// Drop sentences whose checksum is missing or wrong (default `true`).
    pub validate_checksum: bool,
    /// Buffer multi-sentence messages until complete (default `true`).
    /// When disabled, each fragment is decoded on its own.
    pub enable_reassembly: bool,
    /// Age after which an incomplete fragment set is evicted (default `60`).
    pub max_reassembly_age_seconds: u64,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            validate_checksum: true,
            enable_reassembly: true,
            max_reassembly_age_seconds: 60,
        }
    }
}

impl DecoderConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable                         | Default | Field                        |
    /// |----------------------------------|---------|------------------------------|
    /// | `AIS_VALIDATE_CHECKSUM`          | `true`  | `validate_checksum`          |
    /// | `AIS_ENABLE_REASSEMBLY`          | `true`  | `enable_reassembly`          |
    /// | `AIS_MAX_REASSEMBLY_AGE_SECONDS` | `60`    | `max_reassembly_age_seconds` |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            validate_checksum: parse_flag(lookup("AIS_VALIDATE_CHECKSUM"))
                .unwrap_or(defaults.validate_checksum),
            enable_reassembly: parse_flag(lookup("AIS_ENABLE_REASSEMBLY"))
                .unwrap_or(defaults.enable_reassembly),
            max_reassembly_age_seconds: lookup("AIS_MAX_REASSEMBLY_AGE_SECONDS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_reassembly_age_seconds),
        }
    }
}

/// Settings for [`Encoder`](crate::Encoder).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EncoderConfig {
    /// Split long payloads across several sentences (default `true`).
    pub enable_fragmentation: bool,
    /// Armored characters per sentence before splitting (default `60`).
    pub max_fragment_chars: usize,
    /// Radio channel written into every sentence (default `'A'`).
    pub channel: char,
    /// Fixed sequence id for multipart messages, `0..=9`. `None` rotates
    /// through `0..=9`.
    pub sequence_id: Option<u8>,
    /// Two-character talker id (default `"AI"`).
    pub talker: String,
    /// Emit `VDO` (own vessel) instead of `VDM` sentences.
    pub own_vessel: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            enable_fragmentation: true,
            max_fragment_chars: 60,
            channel: 'A',
            sequence_id: None,
            talker: "AI".to_string(),
            own_vessel: false,
        }
    }
}

impl EncoderConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable                   | Default | Field                  |
    /// |----------------------------|---------|------------------------|
    /// | `AIS_ENABLE_FRAGMENTATION` | `true`  | `enable_fragmentation` |
    /// | `AIS_MAX_FRAGMENT_CHARS`   | `60`    | `max_fragment_chars`   |
    /// | `AIS_CHANNEL`              | `A`     | `channel`              |
    /// | `AIS_SEQUENCE_ID`          | rotate  | `sequence_id`          |
    /// | `AIS_TALKER`               | `AI`    | `talker`               |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            enable_fragmentation: parse_flag(lookup("AIS_ENABLE_FRAGMENTATION"))
                .unwrap_or(defaults.enable_fragmentation),
            max_fragment_chars: lookup("AIS_MAX_FRAGMENT_CHARS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|&n| n > 0)
                .unwrap_or(defaults.max_fragment_chars),
            channel: lookup("AIS_CHANNEL")
                .and_then(|v| single_char(&v))
                .filter(char::is_ascii_alphanumeric)
                .unwrap_or(defaults.channel),
            sequence_id: lookup("AIS_SEQUENCE_ID")
                .and_then(|v| v.trim().parse().ok())
                .filter(|&id: &u8| id <= 9)
                .or(defaults.sequence_id),
            talker: lookup("AIS_TALKER")
                .map(|v| v.trim().to_ascii_uppercase())
                .filter(|v| v.len() == 2 && v.chars().all(|c| c.is_ascii_alphabetic()))
                .unwrap_or(defaults.talker),
            own_vessel: defaults.own_vessel,
        }
    }

    /// Check the values that are written verbatim into every sentence.
    ///
    /// The channel must be a single ASCII letter or digit, the talker two
    /// ASCII letters and a fixed sequence id at most 9; anything else would
    /// produce sentences that do not parse back.
    pub fn validate(&self) -> Result<(), CodecError> {
        if !self.channel.is_ascii_alphanumeric() {
            return Err(CodecError::domain(
                "channel",
                format!("{:?} is not a radio channel", self.channel),
            ));
        }
        if self.talker.len() != 2 || !self.talker.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CodecError::domain(
                "talker",
                format!("{:?} is not a two-letter talker id", self.talker),
            ));
        }
        if let Some(id) = self.sequence_id.filter(|&id| id > 9) {
            return Err(CodecError::domain(
                "sequence_id",
                format!("{id} is outside 0..=9"),
            ));
        }
        if self.max_fragment_chars == 0 {
            return Err(CodecError::domain("max_fragment_chars", "must be at least 1"));
        }
        Ok(())
    }
}

fn parse_flag(value: Option<String>) -> Option<bool> {
    match value?.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn single_char(value: &str) -> Option<char> {
    let mut chars = value.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_graphic() => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn decoder_defaults() {
        let cfg = DecoderConfig::default();
        assert!(cfg.validate_checksum);
        assert!(cfg.enable_reassembly);
        assert_eq!(cfg.max_reassembly_age_seconds, 60);
        assert_eq!(DecoderConfig::from_lookup(lookup(&[])), cfg);
    }

    #[test]
    fn decoder_reads_environment() {
        let cfg = DecoderConfig::from_lookup(lookup(&[
            ("AIS_VALIDATE_CHECKSUM", "false"),
            ("AIS_ENABLE_REASSEMBLY", "0"),
            ("AIS_MAX_REASSEMBLY_AGE_SECONDS", " 15 "),
        ]));
        assert!(!cfg.validate_checksum);
        assert!(!cfg.enable_reassembly);
        assert_eq!(cfg.max_reassembly_age_seconds, 15);
    }

    #[test]
    fn unparsable_values_keep_defaults() {
        let cfg = DecoderConfig::from_lookup(lookup(&[
            ("AIS_VALIDATE_CHECKSUM", "maybe"),
            ("AIS_MAX_REASSEMBLY_AGE_SECONDS", "-3"),
        ]));
        assert_eq!(cfg, DecoderConfig::default());

        let cfg = EncoderConfig::from_lookup(lookup(&[
            ("AIS_MAX_FRAGMENT_CHARS", "0"),
            ("AIS_CHANNEL", "AB"),
            ("AIS_SEQUENCE_ID", "12"),
            ("AIS_TALKER", "A1"),
        ]));
        assert_eq!(cfg, EncoderConfig::default());
    }

    #[test]
    fn encoder_defaults() {
        let cfg = EncoderConfig::default();
        assert!(cfg.enable_fragmentation);
        assert_eq!(cfg.max_fragment_chars, 60);
        assert_eq!(cfg.channel, 'A');
        assert_eq!(cfg.sequence_id, None);
        assert_eq!(cfg.talker, "AI");
        assert!(!cfg.own_vessel);
    }

    #[test]
    fn encoder_reads_environment() {
        let cfg = EncoderConfig::from_lookup(lookup(&[
            ("AIS_ENABLE_FRAGMENTATION", "off"),
            ("AIS_MAX_FRAGMENT_CHARS", "40"),
            ("AIS_CHANNEL", "B"),
            ("AIS_SEQUENCE_ID", "7"),
            ("AIS_TALKER", "bs"),
        ]));
        assert!(!cfg.enable_fragmentation);
        assert_eq!(cfg.max_fragment_chars, 40);
        assert_eq!(cfg.channel, 'B');
        assert_eq!(cfg.sequence_id, Some(7));
        assert_eq!(cfg.talker, "BS");
    }

    #[test]
    fn encoder_validation() {
        assert_eq!(EncoderConfig::default().validate(), Ok(()));
        assert_eq!(
            EncoderConfig {
                channel: '2',
                talker: "bs".into(),
                sequence_id: Some(9),
                ..EncoderConfig::default()
            }
            .validate(),
            Ok(())
        );

        let field = |cfg: EncoderConfig| match cfg.validate() {
            Err(CodecError::InvalidEncodeDomain { field, .. }) => field,
            other => panic!("expected a domain error, got {other:?}"),
        };
        for channel in [',', '*', ' '] {
            let cfg = EncoderConfig {
                channel,
                ..EncoderConfig::default()
            };
            assert_eq!(field(cfg), "channel");
        }
        let cfg = EncoderConfig {
            sequence_id: Some(10),
            ..EncoderConfig::default()
        };
        assert_eq!(field(cfg), "sequence_id");
        let cfg = EncoderConfig {
            talker: "A,".into(),
            ..EncoderConfig::default()
        };
        assert_eq!(field(cfg), "talker");
        let cfg = EncoderConfig {
            max_fragment_chars: 0,
            ..EncoderConfig::default()
        };
        assert_eq!(field(cfg), "max_fragment_chars");
    }

    #[test]
    fn deserialize_fills_missing_fields() {
        let cfg: DecoderConfig =
            serde_json::from_str(r#"{ "validate_checksum": false }"#).unwrap();
        assert!(!cfg.validate_checksum);
        assert_eq!(cfg.max_reassembly_age_seconds, 60);

        let cfg: EncoderConfig =
            serde_json::from_str(r#"{ "channel": "B", "sequence_id": 3 }"#).unwrap();
        assert_eq!(cfg.channel, 'B');
        assert_eq!(cfg.sequence_id, Some(3));
        assert_eq!(cfg.talker, "AI");
    }
}
