//! Codec error types.
//!
//! [`CodecError`] is returned by every fallible operation in the crate. The
//! [`Decoder`](crate::Decoder) turns these into "no record" and logs them;
//! the [`Encoder`](crate::Encoder) reports them to the caller.

/// Error type for framing, bit access and message encode/decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The transmitted checksum does not match the XOR of the sentence body.
    #[error("checksum mismatch: sentence carries {expected:02X}, computed {computed:02X}")]
    ChecksumMismatch {
        /// Checksum as transmitted.
        expected: u8,
        /// Checksum computed over the sentence body.
        computed: u8,
    },

    /// Missing delimiters, missing fields or out-of-range field values.
    #[error("malformed sentence: {reason}")]
    MalformedSentence {
        /// What was wrong with the sentence.
        reason: String,
    },

    /// A multipart message is still waiting for fragments.
    #[error("incomplete multipart message: {received} of {total} fragments")]
    IncompleteMultipart {
        /// Distinct fragments held so far.
        received: usize,
        /// Fragments the message consists of.
        total: u8,
    },

    /// A read ran past the end of the bit sequence.
    #[error("truncated payload: {len} bits at offset {offset} exceed {available} available")]
    TruncatedPayload {
        /// Bit offset of the read.
        offset: usize,
        /// Requested width in bits.
        len: usize,
        /// Total length of the bit sequence.
        available: usize,
    },

    /// A value cannot be represented in its wire field.
    #[error("cannot encode {field}: {reason}")]
    InvalidEncodeDomain {
        /// Field being written.
        field: &'static str,
        /// Why the value is out of domain.
        reason: String,
    },

    /// A cursor position beyond the end of the bit sequence.
    #[error("position {position} is beyond bit length {len}")]
    InvalidPosition {
        /// Requested cursor position.
        position: usize,
        /// Length of the bit sequence.
        len: usize,
    },

    /// A known message type whose sub-layout selector is reserved.
    #[error("unsupported layout for message type {message_type}: {reason}")]
    UnsupportedLayout {
        /// The 6-bit message type id.
        message_type: u8,
        /// Which selector is unsupported.
        reason: String,
    },
}

impl CodecError {
    /// Shorthand for [`CodecError::MalformedSentence`].
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedSentence {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`CodecError::InvalidEncodeDomain`].
    pub(crate) fn domain(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidEncodeDomain {
            field,
            reason: reason.into(),
        }
    }
}
