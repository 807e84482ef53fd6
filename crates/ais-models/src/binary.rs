//! Binary and safety-related message records, and the opaque
//! [`BinaryPayload`] they carry.
//!
//! Application payloads (DAC/FID-specific data, DGNSS corrections) are not
//! interpreted: they are kept as a bit-exact opaque range so that encoding a
//! decoded record reproduces the original bits.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::message::Header;

// ---------------------------------------------------------------------------
// BinaryPayload
// ---------------------------------------------------------------------------

/// An opaque, bit-length-exact run of payload bits.
///
/// Bits are packed MSB-first; bits of the final byte beyond `bit_len` are
/// always zero. Serialises as `{ "bits": <len>, "data": "<base64>" }`.
///
/// # Examples
///
/// ```
/// use ais_models::BinaryPayload;
///
/// let payload = BinaryPayload::from_bits(vec![0b1010_1111], 4).unwrap();
/// assert_eq!(payload.bit_len(), 4);
/// assert_eq!(payload.as_bytes(), &[0b1010_0000]);
/// assert!(payload.bit(0));
/// assert!(!payload.bit(1));
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "PayloadRepr", into = "PayloadRepr")]
pub struct BinaryPayload {
    bytes: Vec<u8>,
    bit_len: usize,
}

impl BinaryPayload {
    /// A payload covering every bit of `bytes`.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let bit_len = bytes.len() * 8;
        Self { bytes, bit_len }
    }

    /// A payload of exactly `bit_len` bits taken from the front of `bytes`.
    ///
    /// Surplus bytes are dropped and unused trailing bits are cleared.
    pub fn from_bits(mut bytes: Vec<u8>, bit_len: usize) -> Result<Self, ModelError> {
        let needed = bit_len.div_ceil(8);
        if bytes.len() < needed {
            return Err(ModelError::InvalidPayloadLength {
                bits: bit_len,
                bytes: bytes.len(),
            });
        }
        bytes.truncate(needed);
        let used = bit_len % 8;
        if used != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= 0xFFu8 << (8 - used);
            }
        }
        Ok(Self { bytes, bit_len })
    }

    /// Number of meaningful bits.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// `true` when the payload holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// The packed bytes (MSB-first, zero-padded).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The bit at `index` (0 = most significant bit of the first byte).
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.bit_len()`.
    pub fn bit(&self, index: usize) -> bool {
        assert!(index < self.bit_len, "bit index out of range");
        self.bytes[index / 8] & (0x80 >> (index % 8)) != 0
    }

    /// Base64 text of the packed bytes.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

#[derive(Serialize, Deserialize)]
struct PayloadRepr {
    bits: usize,
    data: String,
}

impl TryFrom<PayloadRepr> for BinaryPayload {
    type Error = String;

    fn try_from(repr: PayloadRepr) -> Result<Self, Self::Error> {
        let bytes = STANDARD.decode(repr.data).map_err(|e| e.to_string())?;
        Self::from_bits(bytes, repr.bits).map_err(|e| e.to_string())
    }
}

impl From<BinaryPayload> for PayloadRepr {
    fn from(payload: BinaryPayload) -> Self {
        Self {
            data: payload.to_base64(),
            bits: payload.bit_len,
        }
    }
}

// ---------------------------------------------------------------------------
// ApplicationId
// ---------------------------------------------------------------------------

/// Designated area code and function identifier of a binary application.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ApplicationId {
    /// Designated area code (10 bits).
    pub dac: u16,
    /// Function identifier (6 bits).
    pub fid: u8,
}

// ---------------------------------------------------------------------------
// AddressedBinary (type 6)
// ---------------------------------------------------------------------------

/// Addressed binary message (type 6).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AddressedBinary {
    /// Common header.
    pub header: Header,
    /// Sequence number (2 bits).
    pub sequence_number: u8,
    /// Destination MMSI.
    pub dest_mmsi: u32,
    /// Retransmit flag.
    pub retransmit: bool,
    /// Application identifier.
    pub application_id: ApplicationId,
    /// Application data (up to 920 bits).
    pub data: BinaryPayload,
}

// ---------------------------------------------------------------------------
// Acknowledge (types 7, 13)
// ---------------------------------------------------------------------------

/// One acknowledged (MMSI, sequence number) pair.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Acknowledgement {
    /// MMSI of the acknowledged station.
    pub mmsi: u32,
    /// Sequence number of the acknowledged message (2 bits).
    pub sequence_number: u8,
}

/// Binary acknowledge (type 7) or safety acknowledge (type 13).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Acknowledge {
    /// Common header.
    pub header: Header,
    /// One to four acknowledgements.
    pub acknowledgements: Vec<Acknowledgement>,
}

// ---------------------------------------------------------------------------
// BinaryBroadcast (type 8)
// ---------------------------------------------------------------------------

/// Binary broadcast message (type 8).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct BinaryBroadcast {
    /// Common header.
    pub header: Header,
    /// Application identifier.
    pub application_id: ApplicationId,
    /// Application data (up to 952 bits).
    pub data: BinaryPayload,
}

// ---------------------------------------------------------------------------
// AddressedSafety (type 12) / SafetyBroadcast (type 14)
// ---------------------------------------------------------------------------

/// Addressed safety-related message (type 12).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AddressedSafety {
    /// Common header.
    pub header: Header,
    /// Sequence number (2 bits).
    pub sequence_number: u8,
    /// Destination MMSI.
    pub dest_mmsi: u32,
    /// Retransmit flag.
    pub retransmit: bool,
    /// Safety-related text, up to 156 characters.
    pub text: String,
}

/// Safety-related broadcast message (type 14).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SafetyBroadcast {
    /// Common header.
    pub header: Header,
    /// Safety-related text, up to 161 characters.
    pub text: String,
}

// ---------------------------------------------------------------------------
// DgnssBroadcast (type 17)
// ---------------------------------------------------------------------------

/// DGNSS broadcast binary message (type 17).
///
/// The reference position has 1/10 minute resolution.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct DgnssBroadcast {
    /// Common header.
    pub header: Header,
    /// Reference station longitude in degrees.
    pub longitude: f64,
    /// Reference station latitude in degrees.
    pub latitude: f64,
    /// Differential correction data (up to 736 bits).
    pub data: BinaryPayload,
}

// ---------------------------------------------------------------------------
// SingleSlotBinary (type 25) / MultipleSlotBinary (type 26)
// ---------------------------------------------------------------------------

/// Single slot binary message (type 25).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SingleSlotBinary {
    /// Common header.
    pub header: Header,
    /// Destination MMSI when the message is addressed.
    pub dest_mmsi: Option<u32>,
    /// Application identifier when the payload is structured.
    pub application_id: Option<ApplicationId>,
    /// Application data.
    pub data: BinaryPayload,
}

/// Multiple slot binary message with communication state (type 26).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct MultipleSlotBinary {
    /// Common header.
    pub header: Header,
    /// Destination MMSI when the message is addressed.
    pub dest_mmsi: Option<u32>,
    /// Application identifier when the payload is structured.
    pub application_id: Option<ApplicationId>,
    /// Application data.
    pub data: BinaryPayload,
    /// 20-bit communication state (selector flag + 19-bit state).
    pub radio_status: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bits_masks_trailing_bits() {
        let payload = BinaryPayload::from_bits(vec![0xFF, 0xFF, 0xFF], 12).unwrap();
        assert_eq!(payload.as_bytes(), &[0xFF, 0xF0]);
        assert_eq!(payload.bit_len(), 12);
    }

    #[test]
    fn from_bits_rejects_short_buffer() {
        let err = BinaryPayload::from_bits(vec![0x00], 9).unwrap_err();
        assert_eq!(err, ModelError::InvalidPayloadLength { bits: 9, bytes: 1 });
    }

    #[test]
    fn empty_payload() {
        let payload = BinaryPayload::default();
        assert!(payload.is_empty());
        assert_eq!(payload.to_base64(), "");
    }

    #[test]
    fn payload_serde_shape() {
        let payload = BinaryPayload::from_bits(vec![0xDE, 0xAD, 0xB0], 20).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["bits"], 20);
        assert_eq!(json["data"], "3q2w");
        let back: BinaryPayload = serde_json::from_value(json).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn payload_serde_rejects_bad_length() {
        let json = serde_json::json!({ "bits": 64, "data": "3q0=" });
        assert!(serde_json::from_value::<BinaryPayload>(json).is_err());
    }
}
