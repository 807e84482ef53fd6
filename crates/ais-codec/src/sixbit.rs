//! AIS 6-bit ASCII armor.
//!
//! ```text
//! '0'..='W'  (48..=87)   ->  0..=39
//! '`'..='w'  (96..=119)  -> 40..=63
//! ```
//!
//! Characters outside both ranges decode to 0.

use crate::bits::Bits;

/// Armor character value, 0 for anything outside the two valid ranges.
pub fn char_value(c: u8) -> u8 {
    match c {
        48..=87 => (c - 48) & 0x3F,
        96..=119 => (c - 56) & 0x3F,
        _ => 0,
    }
}

/// Armor character for a 6-bit value.
pub fn value_char(value: u8) -> char {
    let value = value & 0x3F;
    if value < 40 {
        char::from(value + 48)
    } else {
        char::from(value + 56)
    }
}

/// Unpack an armored payload into its bit sequence (6 bits per character).
///
/// # Examples
///
/// ```
/// let bits = ais_codec::sixbit::decode("1");
/// assert_eq!(bits.len(), 6);
/// assert_eq!(bits.uint(0, 6).unwrap(), 1);
/// ```
pub fn decode(payload: &str) -> Bits {
    let mut bits = Bits::with_capacity(payload.len() * 6);
    for c in payload.bytes() {
        bits.push_uint(u64::from(char_value(c)), 6);
    }
    bits
}

/// Armor a bit sequence, zero-padding it to a multiple of 6 bits.
pub fn encode(bits: &Bits) -> String {
    let len = bits.len();
    let mut out = String::with_capacity(len.div_ceil(6));
    let mut offset = 0;
    while offset < len {
        let take = (len - offset).min(6);
        let chunk = bits.uint(offset, take).unwrap_or(0) << (6 - take);
        #[allow(clippy::cast_possible_truncation)]
        let chunk = chunk as u8;
        out.push(value_char(chunk));
        offset += take;
    }
    out
}

/// Padding bits needed to bring `bit_len` to a multiple of 6.
#[allow(clippy::cast_possible_truncation)]
pub fn fill_bits(bit_len: usize) -> u8 {
    ((6 - bit_len % 6) % 6) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_all_values() {
        for value in 0u8..64 {
            let c = value_char(value);
            assert_eq!(char_value(c as u8), value, "value {value} via {c:?}");
        }
        assert_eq!(value_char(39), 'W');
        assert_eq!(value_char(40), '`');
        assert_eq!(value_char(63), 'w');
    }

    #[test]
    fn gap_and_invalid_characters_decode_to_zero() {
        for c in 88u8..=95 {
            assert_eq!(char_value(c), 0);
        }
        assert_eq!(char_value(b'!'), 0);
        assert_eq!(char_value(b'x'), 0);
    }

    #[test]
    fn encode_pads_with_zero_bits() {
        let mut bits = Bits::default();
        bits.push_uint(0b1, 1);
        // 1 bit -> 100000 = 32 -> 'P'
        assert_eq!(encode(&bits), "P");
        assert_eq!(fill_bits(bits.len()), 5);
    }

    #[test]
    fn armor_roundtrip() {
        let payload = "13aEOn?P00PD3wVMdLDRhgvL289?";
        let bits = decode(payload);
        assert_eq!(bits.len(), 168);
        assert_eq!(encode(&bits), payload);
    }

    #[test]
    fn fill_bit_counts() {
        assert_eq!(fill_bits(0), 0);
        assert_eq!(fill_bits(168), 0);
        assert_eq!(fill_bits(424), 2);
        assert_eq!(fill_bits(72), 0);
        assert_eq!(fill_bits(97), 5);
    }
}
