//! Error types for the `ais-models` crate.
//!
//! All fallible constructors and `FromStr` implementations in this crate
//! return variants of [`ModelError`].

/// Errors produced when constructing or validating model types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The sentence address field was not a two-character talker followed by
    /// `VDM` or `VDO`.
    #[error("invalid sentence address \"{value}\": {reason}")]
    InvalidAddress {
        /// The value that failed validation.
        value: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// A radio channel designator was not a single printable ASCII character.
    #[error("invalid channel \"{value}\"")]
    InvalidChannel {
        /// The value that failed validation.
        value: String,
    },

    /// A binary payload's byte buffer was too short for its declared bit length.
    #[error("binary payload of {bytes} bytes cannot hold {bits} bits")]
    InvalidPayloadLength {
        /// Declared bit length.
        bits: usize,
        /// Number of bytes supplied.
        bytes: usize,
    },
}
