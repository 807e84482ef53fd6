//! Bit-level access to AIS payloads.
//!
//! [`Bits`] is an owned, MSB-first packed bit sequence. [`BitReader`] walks
//! it with a cursor (every read has a cursor form that advances and an
//! `*_at` form that does not); [`BitWriter`] builds one field by field and
//! grows as needed. Both apply the AIS field conventions: two's-complement
//! signed fields, 6-bit text, coordinate scaling and the reserved
//! "not available" codes.

use ais_models::{
    BinaryPayload, LATITUDE_NOT_AVAILABLE, LONGITUDE_NOT_AVAILABLE, ROT_NOT_AVAILABLE,
    ROT_SATURATED_LEFT, ROT_SATURATED_RIGHT, SPEED_MAX,
};

use crate::error::CodecError;

/// Divisor for 27/28-bit coordinates (1/10 000 minute).
pub const FINE_COORDINATE_SCALE: f64 = 600_000.0;
/// Divisor for 17/18-bit coordinates (1/10 minute).
pub const COARSE_COORDINATE_SCALE: f64 = 600.0;

const SPEED_UNAVAILABLE_RAW: u64 = 1023;
const SPEED_MAX_RAW: u64 = 1022;
const COURSE_UNAVAILABLE_RAW: u64 = 3600;
const COURSE_MAX_RAW: u64 = 4095;
const ROT_SCALE: f64 = 4.733;
const ROT_MAX_RAW: f64 = 126.0;

/// Scale for a coordinate field of the given width.
fn coordinate_scale(len: usize) -> f64 {
    if len >= 27 {
        FINE_COORDINATE_SCALE
    } else {
        COARSE_COORDINATE_SCALE
    }
}

// ---------------------------------------------------------------------------
// Bits
// ---------------------------------------------------------------------------

/// An owned bit sequence, packed MSB-first.
///
/// Bits of the last byte beyond [`len`](Self::len) are always zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bits {
    bytes: Vec<u8>,
    len: usize,
}

impl Bits {
    /// Empty sequence with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when the sequence holds no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The packed bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Append one bit.
    pub fn push_bit(&mut self, bit: bool) {
        if self.len % 8 == 0 {
            self.bytes.push(0);
        }
        if bit {
            self.bytes[self.len / 8] |= 0x80 >> (self.len % 8);
        }
        self.len += 1;
    }

    /// Append the low `width` bits of `value`, most significant first.
    pub fn push_uint(&mut self, value: u64, width: usize) {
        for shift in (0..width).rev() {
            self.push_bit(shift < 64 && (value >> shift) & 1 == 1);
        }
    }

    fn bit(&self, index: usize) -> bool {
        self.bytes[index / 8] & (0x80 >> (index % 8)) != 0
    }

    fn check(&self, offset: usize, width: usize) -> Result<(), CodecError> {
        match offset.checked_add(width) {
            Some(end) if end <= self.len => Ok(()),
            _ => Err(CodecError::TruncatedPayload {
                offset,
                len: width,
                available: self.len,
            }),
        }
    }

    /// Unsigned big-endian value of `width` (≤ 64) bits at `offset`.
    pub fn uint(&self, offset: usize, width: usize) -> Result<u64, CodecError> {
        debug_assert!(width <= 64, "field wider than 64 bits");
        self.check(offset, width)?;
        Ok((offset..offset + width).fold(0u64, |acc, i| (acc << 1) | u64::from(self.bit(i))))
    }

    /// A copy of `width` bits starting at `offset`.
    pub fn slice(&self, offset: usize, width: usize) -> Result<Bits, CodecError> {
        self.check(offset, width)?;
        let mut out = Bits::with_capacity(width);
        for i in offset..offset + width {
            out.push_bit(self.bit(i));
        }
        Ok(out)
    }

    /// Drop everything after the first `len` bits.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        self.len = len;
        self.bytes.truncate(len.div_ceil(8));
        let used = len % 8;
        if used != 0 {
            if let Some(last) = self.bytes.last_mut() {
                *last &= 0xFFu8 << (8 - used);
            }
        }
    }

    /// Append every bit of `other`.
    pub fn extend(&mut self, other: &Bits) {
        for i in 0..other.len {
            self.push_bit(other.bit(i));
        }
    }
}

impl From<&BinaryPayload> for Bits {
    fn from(payload: &BinaryPayload) -> Self {
        Self {
            bytes: payload.as_bytes().to_vec(),
            len: payload.bit_len(),
        }
    }
}

impl From<Bits> for BinaryPayload {
    fn from(bits: Bits) -> Self {
        // bytes always cover exactly len bits
        BinaryPayload::from_bits(bits.bytes, bits.len).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// BitReader
// ---------------------------------------------------------------------------

/// Cursor over a [`Bits`] sequence.
///
/// Every read checks bounds first: a read past the end returns
/// [`CodecError::TruncatedPayload`] and leaves the cursor untouched.
///
/// # Examples
///
/// ```
/// use ais_codec::{sixbit, BitReader};
///
/// let bits = sixbit::decode("13aEOn?P00PD3wVMdLDRhgvL289?");
/// let mut reader = BitReader::new(&bits);
/// assert_eq!(reader.uint(6).unwrap(), 1);
/// reader.skip(2).unwrap();
/// assert_eq!(reader.uint(30).unwrap(), 244_670_424);
/// assert_eq!(reader.position(), 38);
/// ```
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    bits: &'a Bits,
    cursor: usize,
}

impl<'a> BitReader<'a> {
    /// Reader positioned at bit 0.
    pub fn new(bits: &'a Bits) -> Self {
        Self { bits, cursor: 0 }
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Total length of the underlying sequence.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// `true` when the underlying sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bits left after the cursor.
    pub fn remaining(&self) -> usize {
        self.bits.len() - self.cursor
    }

    /// Move the cursor to an absolute position (at most the length).
    pub fn set_position(&mut self, position: usize) -> Result<(), CodecError> {
        if position > self.bits.len() {
            return Err(CodecError::InvalidPosition {
                position,
                len: self.bits.len(),
            });
        }
        self.cursor = position;
        Ok(())
    }

    /// Advance the cursor by `n` bits.
    pub fn skip(&mut self, n: usize) -> Result<(), CodecError> {
        self.bits.check(self.cursor, n)?;
        self.cursor += n;
        Ok(())
    }

    fn advance<T>(&mut self, len: usize, value: Result<T, CodecError>) -> Result<T, CodecError> {
        let value = value?;
        self.cursor += len;
        Ok(value)
    }

    // -- absolute reads ------------------------------------------------------

    /// Unsigned value at `start`.
    pub fn uint_at(&self, start: usize, len: usize) -> Result<u64, CodecError> {
        self.bits.uint(start, len)
    }

    /// Two's-complement signed value at `start`.
    #[allow(clippy::cast_possible_wrap)]
    pub fn int_at(&self, start: usize, len: usize) -> Result<i64, CodecError> {
        let raw = self.bits.uint(start, len)?;
        if len == 0 {
            return Ok(0);
        }
        let mask = if len >= 64 { u64::MAX } else { (1u64 << len) - 1 };
        if (raw >> (len - 1)) & 1 == 1 {
            Ok(-((((!raw).wrapping_add(1)) & mask) as i64))
        } else {
            Ok(raw as i64)
        }
    }

    /// Single flag at `start`.
    pub fn bool_at(&self, start: usize) -> Result<bool, CodecError> {
        Ok(self.bits.uint(start, 1)? == 1)
    }

    /// 6-bit text of `len / 6` characters at `start`.
    ///
    /// Decoding stops at the first `@` (value 0); trailing spaces are trimmed.
    #[allow(clippy::cast_possible_truncation)]
    pub fn string_at(&self, start: usize, len: usize) -> Result<String, CodecError> {
        self.bits.check(start, len)?;
        let mut text = String::with_capacity(len / 6);
        for i in 0..len / 6 {
            let value = self.bits.uint(start + i * 6, 6)? as u8;
            if value == 0 {
                break;
            }
            text.push(if value < 32 {
                char::from(value + 64)
            } else {
                char::from(value)
            });
        }
        text.truncate(text.trim_end_matches(' ').len());
        Ok(text)
    }

    /// Latitude in degrees; 27-bit fields use 1/10 000 minute, 17-bit 1/10.
    #[allow(clippy::cast_precision_loss)]
    pub fn latitude_at(&self, start: usize, len: usize) -> Result<f64, CodecError> {
        Ok(self.int_at(start, len)? as f64 / coordinate_scale(len))
    }

    /// Longitude in degrees; 28-bit fields use 1/10 000 minute, 18-bit 1/10.
    #[allow(clippy::cast_precision_loss)]
    pub fn longitude_at(&self, start: usize, len: usize) -> Result<f64, CodecError> {
        Ok(self.int_at(start, len)? as f64 / coordinate_scale(len))
    }

    /// Speed over ground in knots from a 10-bit field.
    ///
    /// 1023 ("not available") reads as 0.0 and 1022 as 102.2.
    #[allow(clippy::cast_precision_loss)]
    pub fn speed_at(&self, start: usize) -> Result<f64, CodecError> {
        Ok(match self.bits.uint(start, 10)? {
            SPEED_UNAVAILABLE_RAW => 0.0,
            SPEED_MAX_RAW => SPEED_MAX,
            raw => raw as f64 / 10.0,
        })
    }

    /// Course over ground in degrees from a 12-bit field; 3600 reads as 0.0.
    #[allow(clippy::cast_precision_loss)]
    pub fn course_at(&self, start: usize) -> Result<f64, CodecError> {
        Ok(match self.bits.uint(start, 12)? {
            COURSE_UNAVAILABLE_RAW => 0.0,
            raw => raw as f64 / 10.0,
        })
    }

    /// Rate of turn in degrees per minute from a signed 8-bit field.
    ///
    /// -128, 127 and -127 are passed through as sentinels.
    #[allow(clippy::cast_precision_loss)]
    pub fn rate_of_turn_at(&self, start: usize) -> Result<f64, CodecError> {
        let raw = self.int_at(start, 8)?;
        Ok(match raw {
            -128 | 127 | -127 => raw as f64,
            _ => {
                let magnitude = (raw as f64 / ROT_SCALE).powi(2);
                if raw < 0 {
                    -magnitude
                } else {
                    magnitude
                }
            }
        })
    }

    /// Opaque payload of `len` bits at `start`.
    pub fn payload_at(&self, start: usize, len: usize) -> Result<BinaryPayload, CodecError> {
        Ok(self.bits.slice(start, len)?.into())
    }

    // -- cursor reads --------------------------------------------------------

    /// Unsigned value at the cursor.
    pub fn uint(&mut self, len: usize) -> Result<u64, CodecError> {
        let v = self.uint_at(self.cursor, len);
        self.advance(len, v)
    }

    /// Unsigned value of at most 8 bits at the cursor.
    #[allow(clippy::cast_possible_truncation)]
    pub fn u8(&mut self, len: usize) -> Result<u8, CodecError> {
        debug_assert!(len <= 8);
        Ok(self.uint(len)? as u8)
    }

    /// Unsigned value of at most 16 bits at the cursor.
    #[allow(clippy::cast_possible_truncation)]
    pub fn u16(&mut self, len: usize) -> Result<u16, CodecError> {
        debug_assert!(len <= 16);
        Ok(self.uint(len)? as u16)
    }

    /// Unsigned value of at most 32 bits at the cursor.
    #[allow(clippy::cast_possible_truncation)]
    pub fn u32(&mut self, len: usize) -> Result<u32, CodecError> {
        debug_assert!(len <= 32);
        Ok(self.uint(len)? as u32)
    }

    /// Signed value at the cursor.
    pub fn int(&mut self, len: usize) -> Result<i64, CodecError> {
        let v = self.int_at(self.cursor, len);
        self.advance(len, v)
    }

    /// Flag at the cursor.
    pub fn bool(&mut self) -> Result<bool, CodecError> {
        let v = self.bool_at(self.cursor);
        self.advance(1, v)
    }

    /// 6-bit text at the cursor.
    pub fn string(&mut self, len: usize) -> Result<String, CodecError> {
        let v = self.string_at(self.cursor, len);
        self.advance(len, v)
    }

    /// Latitude at the cursor.
    pub fn latitude(&mut self, len: usize) -> Result<f64, CodecError> {
        let v = self.latitude_at(self.cursor, len);
        self.advance(len, v)
    }

    /// Longitude at the cursor.
    pub fn longitude(&mut self, len: usize) -> Result<f64, CodecError> {
        let v = self.longitude_at(self.cursor, len);
        self.advance(len, v)
    }

    /// Speed over ground at the cursor.
    pub fn speed(&mut self) -> Result<f64, CodecError> {
        let v = self.speed_at(self.cursor);
        self.advance(10, v)
    }

    /// Course over ground at the cursor.
    pub fn course(&mut self) -> Result<f64, CodecError> {
        let v = self.course_at(self.cursor);
        self.advance(12, v)
    }

    /// Rate of turn at the cursor.
    pub fn rate_of_turn(&mut self) -> Result<f64, CodecError> {
        let v = self.rate_of_turn_at(self.cursor);
        self.advance(8, v)
    }

    /// Opaque payload at the cursor.
    pub fn payload(&mut self, len: usize) -> Result<BinaryPayload, CodecError> {
        let v = self.payload_at(self.cursor, len);
        self.advance(len, v)
    }
}

// ---------------------------------------------------------------------------
// BitWriter
// ---------------------------------------------------------------------------

/// Builds a [`Bits`] sequence field by field.
///
/// Out-of-domain values (NaN coordinates, integers wider than their field)
/// fail with [`CodecError::InvalidEncodeDomain`] naming the field.
#[derive(Debug, Clone, Default)]
pub struct BitWriter {
    bits: Bits,
}

impl BitWriter {
    /// Empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bits written so far.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// `true` before the first write.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Unsigned field; fails if `value` needs more than `len` bits.
    pub fn put_uint(
        &mut self,
        field: &'static str,
        value: impl Into<u64>,
        len: usize,
    ) -> Result<(), CodecError> {
        let value = value.into();
        if len < 64 && value >> len != 0 {
            return Err(CodecError::domain(
                field,
                format!("{value} does not fit in {len} bits"),
            ));
        }
        self.bits.push_uint(value, len);
        Ok(())
    }

    /// Two's-complement signed field.
    #[allow(clippy::cast_sign_loss)]
    pub fn put_int(&mut self, field: &'static str, value: i64, len: usize) -> Result<(), CodecError> {
        if !(1..=64).contains(&len) {
            return Err(CodecError::domain(
                field,
                format!("signed field width {len} is outside 1..=64"),
            ));
        }
        let half = 1i128 << (len - 1);
        if i128::from(value) < -half || i128::from(value) >= half {
            return Err(CodecError::domain(
                field,
                format!("{value} does not fit in {len} signed bits"),
            ));
        }
        self.bits.push_uint(value as u64, len);
        Ok(())
    }

    /// Single flag.
    pub fn put_bool(&mut self, value: bool) {
        self.bits.push_bit(value);
    }

    /// 6-bit text of `len / 6` characters.
    ///
    /// Text is upper-cased; characters without a 6-bit code become `?`;
    /// longer text is cut off and shorter text padded with `@`.
    pub fn put_string(&mut self, value: &str, len: usize) {
        let mut chars = value.chars().map(|c| c.to_ascii_uppercase());
        for _ in 0..len / 6 {
            let code = match chars.next() {
                None => 0,
                Some(c @ '@'..='_') => u64::from(c) - 64,
                Some(c @ ' '..='?') => u64::from(c),
                Some(_) => u64::from('?'),
            };
            self.bits.push_uint(code, 6);
        }
    }

    fn put_coordinate(
        &mut self,
        field: &'static str,
        value: f64,
        len: usize,
        limit: f64,
        not_available: f64,
    ) -> Result<(), CodecError> {
        #[allow(clippy::float_cmp)]
        let in_domain = value.is_finite() && (value.abs() <= limit || value == not_available);
        if !in_domain {
            return Err(CodecError::domain(
                field,
                format!("{value} is outside ±{limit}°"),
            ));
        }
        #[allow(clippy::cast_possible_truncation)]
        let raw = (value * coordinate_scale(len)).round() as i64;
        self.put_int(field, raw, len)
    }

    /// Latitude in degrees (`91.0` = not available).
    pub fn put_latitude(&mut self, field: &'static str, value: f64, len: usize) -> Result<(), CodecError> {
        self.put_coordinate(field, value, len, 90.0, LATITUDE_NOT_AVAILABLE)
    }

    /// Longitude in degrees (`181.0` = not available).
    pub fn put_longitude(&mut self, field: &'static str, value: f64, len: usize) -> Result<(), CodecError> {
        self.put_coordinate(field, value, len, 180.0, LONGITUDE_NOT_AVAILABLE)
    }

    /// Speed over ground in knots into a 10-bit field; speeds above 102.2
    /// clamp to the "102.2 or more" code.
    pub fn put_speed(&mut self, field: &'static str, value: f64) -> Result<(), CodecError> {
        if !value.is_finite() || value < 0.0 {
            return Err(CodecError::domain(field, format!("{value} is not a speed")));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let raw = ((value * 10.0).round() as u64).min(SPEED_MAX_RAW);
        self.put_uint(field, raw, 10)
    }

    /// Course over ground in degrees into a 12-bit field; values beyond the
    /// field clamp to its largest code.
    pub fn put_course(&mut self, field: &'static str, value: f64) -> Result<(), CodecError> {
        if !value.is_finite() || value < 0.0 {
            return Err(CodecError::domain(field, format!("{value} is not a course")));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let raw = ((value * 10.0).round() as u64).min(COURSE_MAX_RAW);
        self.put_uint(field, raw, 12)
    }

    /// Rate of turn in degrees per minute into a signed 8-bit field.
    ///
    /// The sentinels -128, 127 and -127 are written verbatim; other values
    /// clamp to ±126.
    #[allow(clippy::float_cmp)]
    pub fn put_rate_of_turn(&mut self, field: &'static str, value: f64) -> Result<(), CodecError> {
        if !value.is_finite() {
            return Err(CodecError::domain(field, format!("{value} is not a rate of turn")));
        }
        let raw = if value == ROT_NOT_AVAILABLE
            || value == ROT_SATURATED_RIGHT
            || value == ROT_SATURATED_LEFT
        {
            value
        } else {
            (ROT_SCALE * value.abs().sqrt()).round().min(ROT_MAX_RAW).copysign(value)
        };
        #[allow(clippy::cast_possible_truncation)]
        let raw = raw as i64;
        self.put_int(field, raw, 8)
    }

    /// `len` zero bits.
    pub fn put_padding(&mut self, len: usize) {
        self.bits.push_uint(0, len);
    }

    /// Zero bits up to the next byte boundary.
    pub fn pad_to_byte(&mut self) {
        let rem = self.bits.len() % 8;
        if rem != 0 {
            self.put_padding(8 - rem);
        }
    }

    /// Every bit of an opaque payload.
    pub fn put_payload(&mut self, payload: &BinaryPayload) {
        self.bits.extend(&Bits::from(payload));
    }

    /// The finished bit sequence.
    pub fn finish(self) -> Bits {
        self.bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_of(f: impl FnOnce(&mut BitWriter)) -> Bits {
        let mut w = BitWriter::new();
        f(&mut w);
        w.finish()
    }

    #[test]
    fn push_and_read_unsigned() {
        let bits = bits_of(|w| {
            w.put_uint("a", 5u8, 3).unwrap();
            w.put_uint("b", 0x3FFF_FFFFu32, 30).unwrap();
        });
        assert_eq!(bits.len(), 33);
        assert_eq!(bits.uint(0, 3).unwrap(), 5);
        assert_eq!(bits.uint(3, 30).unwrap(), (1 << 30) - 1);
    }

    #[test]
    fn read_past_end_fails_without_moving() {
        let bits = bits_of(|w| w.put_padding(10));
        let mut r = BitReader::new(&bits);
        r.skip(4).unwrap();
        let err = r.uint(7).unwrap_err();
        assert_eq!(
            err,
            CodecError::TruncatedPayload {
                offset: 4,
                len: 7,
                available: 10
            }
        );
        assert_eq!(r.position(), 4);
        assert_eq!(r.remaining(), 6);
        assert!(r.skip(7).is_err());
    }

    #[test]
    fn set_position_bounds() {
        let bits = bits_of(|w| w.put_padding(12));
        let mut r = BitReader::new(&bits);
        r.set_position(12).unwrap();
        assert_eq!(r.remaining(), 0);
        assert_eq!(
            r.set_position(13).unwrap_err(),
            CodecError::InvalidPosition {
                position: 13,
                len: 12
            }
        );
    }

    #[test]
    fn signed_twos_complement() {
        let bits = bits_of(|w| {
            w.put_int("a", -1, 8).unwrap();
            w.put_int("b", -128, 8).unwrap();
            w.put_int("c", 127, 8).unwrap();
        });
        let r = BitReader::new(&bits);
        assert_eq!(r.int_at(0, 8).unwrap(), -1);
        assert_eq!(r.int_at(8, 8).unwrap(), -128);
        assert_eq!(r.int_at(16, 8).unwrap(), 127);
        assert_eq!(r.uint_at(0, 8).unwrap(), 0xFF);
    }

    #[test]
    fn writer_rejects_wide_values() {
        let mut w = BitWriter::new();
        assert!(matches!(
            w.put_uint("seq", 4u8, 2),
            Err(CodecError::InvalidEncodeDomain { field: "seq", .. })
        ));
        assert!(w.put_int("rot", 128, 8).is_err());
        assert!(w.put_int("rot", -129, 8).is_err());
        assert!(matches!(
            w.put_int("empty", 0, 0),
            Err(CodecError::InvalidEncodeDomain { field: "empty", .. })
        ));
        assert!(w.put_int("wide", 1, 65).is_err());
        assert!(w.is_empty());
    }

    #[test]
    fn strings_stop_at_at_sign_and_trim() {
        let bits = bits_of(|w| w.put_string("ever diadem", 120));
        let r = BitReader::new(&bits);
        assert_eq!(r.string_at(0, 120).unwrap(), "EVER DIADEM");

        let bits = bits_of(|w| w.put_string("AB  ", 36));
        assert_eq!(BitReader::new(&bits).string_at(0, 36).unwrap(), "AB");
    }

    #[test]
    fn strings_replace_unencodable_and_truncate() {
        let bits = bits_of(|w| w.put_string("a~bcdefgh", 24));
        assert_eq!(BitReader::new(&bits).string_at(0, 24).unwrap(), "A?BC");
    }

    #[test]
    fn coordinate_sentinels_roundtrip_exactly() {
        let bits = bits_of(|w| {
            w.put_longitude("lon", 181.0, 28).unwrap();
            w.put_latitude("lat", 91.0, 27).unwrap();
            w.put_longitude("lon", 181.0, 18).unwrap();
            w.put_latitude("lat", 91.0, 17).unwrap();
        });
        let r = BitReader::new(&bits);
        assert_eq!(r.longitude_at(0, 28).unwrap(), 181.0);
        assert_eq!(r.latitude_at(28, 27).unwrap(), 91.0);
        assert_eq!(r.longitude_at(55, 18).unwrap(), 181.0);
        assert_eq!(r.latitude_at(73, 17).unwrap(), 91.0);
    }

    #[test]
    fn coordinate_quantisation() {
        let bits = bits_of(|w| {
            w.put_longitude("lon", -122.345_678_9, 28).unwrap();
            w.put_latitude("lat", 37.5, 17).unwrap();
        });
        let r = BitReader::new(&bits);
        let lon = r.longitude_at(0, 28).unwrap();
        assert!((lon + 122.345_678_9).abs() <= 0.5 / 600_000.0);
        assert_eq!(r.latitude_at(28, 17).unwrap(), 37.5);
    }

    #[test]
    fn coordinates_reject_out_of_domain() {
        let mut w = BitWriter::new();
        assert!(w.put_latitude("lat", f64::NAN, 27).is_err());
        assert!(w.put_latitude("lat", 90.5, 27).is_err());
        assert!(w.put_longitude("lon", f64::INFINITY, 28).is_err());
        assert!(w.put_longitude("lon", -181.0, 28).is_err());
    }

    #[test]
    fn speed_codes() {
        let raw = |v: u64| bits_of(|w| w.put_uint("sog", v, 10).unwrap());
        assert_eq!(BitReader::new(&raw(1023)).speed_at(0).unwrap(), 0.0);
        assert_eq!(BitReader::new(&raw(1022)).speed_at(0).unwrap(), 102.2);
        assert_eq!(BitReader::new(&raw(123)).speed_at(0).unwrap(), 12.3);

        let bits = bits_of(|w| w.put_speed("sog", 250.0).unwrap());
        assert_eq!(bits.uint(0, 10).unwrap(), 1022);
        assert!(BitWriter::new().put_speed("sog", -1.0).is_err());
    }

    #[test]
    fn course_codes() {
        let bits = bits_of(|w| w.put_uint("cog", 3600u16, 12).unwrap());
        assert_eq!(BitReader::new(&bits).course_at(0).unwrap(), 0.0);
        let bits = bits_of(|w| w.put_course("cog", 70.6).unwrap());
        assert_eq!(bits.uint(0, 12).unwrap(), 706);

        let bits = bits_of(|w| w.put_course("cog", 500.0).unwrap());
        assert_eq!(bits.uint(0, 12).unwrap(), 4095);
        assert!(BitWriter::new().put_course("cog", -0.5).is_err());
        assert!(BitWriter::new().put_course("cog", f64::NAN).is_err());
    }

    #[test]
    fn rate_of_turn_sentinels_and_curve() {
        for sentinel in [-128.0, 127.0, -127.0] {
            let bits = bits_of(|w| w.put_rate_of_turn("rot", sentinel).unwrap());
            assert_eq!(BitReader::new(&bits).rate_of_turn_at(0).unwrap(), sentinel);
        }
        let bits = bits_of(|w| w.put_int("rot", -30, 8).unwrap());
        let rot = BitReader::new(&bits).rate_of_turn_at(0).unwrap();
        assert!((rot + (30.0f64 / 4.733).powi(2)).abs() < 1e-9);

        let back = bits_of(|w| w.put_rate_of_turn("rot", rot).unwrap());
        assert_eq!(BitReader::new(&back).int_at(0, 8).unwrap(), -30);

        let clamped = bits_of(|w| w.put_rate_of_turn("rot", 5000.0).unwrap());
        assert_eq!(BitReader::new(&clamped).int_at(0, 8).unwrap(), 126);
    }

    #[test]
    fn payload_slice_and_extend() {
        let bits = bits_of(|w| {
            w.put_uint("x", 0b101u8, 3).unwrap();
            w.put_uint("y", 0xABCu16, 12).unwrap();
        });
        let payload = BitReader::new(&bits).payload_at(3, 12).unwrap();
        assert_eq!(payload.bit_len(), 12);
        assert_eq!(payload.as_bytes(), &[0xAB, 0xC0]);

        let rebuilt = bits_of(|w| {
            w.put_uint("x", 0b101u8, 3).unwrap();
            w.put_payload(&payload);
        });
        assert_eq!(rebuilt, bits);
    }

    #[test]
    fn truncate_clears_trailing_bits() {
        let mut bits = bits_of(|w| w.put_uint("x", 0xFFFFu16, 16).unwrap());
        bits.truncate(10);
        assert_eq!(bits.len(), 10);
        assert_eq!(bits.as_bytes(), &[0xFF, 0xC0]);
    }

    #[test]
    fn pad_to_byte_boundary() {
        let bits = bits_of(|w| {
            w.put_padding(70);
            w.pad_to_byte();
        });
        assert_eq!(bits.len(), 72);
    }
}
