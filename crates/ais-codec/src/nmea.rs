//! NMEA 0183 sentence framing.
//!
//! ```text
//! [\<tag block>\]!AIVDM,<count>,<number>,<seqid>,<channel>,<payload>,<fill>*<hh>\r\n
//! ```
//!
//! The checksum is the XOR of every byte between the start delimiter
//! (`!` or `$`) and `*`, written as two uppercase hex digits.

use ais_models::{parse_channel, SentenceAddress, SentenceFields};
use chrono::{DateTime, TimeZone, Utc};

use crate::error::CodecError;

/// XOR of every byte of `body` (the text between the delimiters).
pub fn checksum(body: &str) -> u8 {
    body.bytes().fold(0, |acc, b| acc ^ b)
}

/// Split a leading `\...\` tag block off a line.
fn split_tag_block(line: &str) -> Result<(Option<&str>, &str), CodecError> {
    let Some(rest) = line.strip_prefix('\\') else {
        return Ok((None, line));
    };
    let end = rest
        .find('\\')
        .ok_or_else(|| CodecError::malformed("unterminated tag block"))?;
    Ok((Some(&rest[..end]), &rest[end + 1..]))
}

/// Split a sentence into its body and transmitted checksum.
fn split_checksum(sentence: &str) -> Result<(&str, Option<u8>), CodecError> {
    let inner = sentence
        .strip_prefix('!')
        .or_else(|| sentence.strip_prefix('$'))
        .ok_or_else(|| CodecError::malformed("missing '!' or '$' start delimiter"))?;
    match inner.split_once('*') {
        Some((body, hex)) => {
            let hex = hex.trim();
            let sum = hex
                .get(..2)
                .filter(|h| h.len() == 2 && hex.len() == 2)
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| CodecError::malformed(format!("bad checksum field {hex:?}")))?;
            Ok((body, Some(sum)))
        }
        None => Ok((inner, None)),
    }
}

fn numeric_field(fields: &[&str], index: usize, name: &str, default: u8) -> Result<u8, CodecError> {
    match fields.get(index).copied() {
        None | Some("") => Ok(default),
        Some(text) => text
            .parse()
            .map_err(|_| CodecError::malformed(format!("{name} {text:?} is not a number"))),
    }
}

/// Parse one sentence line into its fields.
///
/// With `validate`, the checksum must be present and match; without it, a
/// missing or wrong checksum is accepted and only recorded.
///
/// # Examples
///
/// ```
/// use ais_codec::nmea;
///
/// let fields = nmea::parse("!AIVDM,1,1,,A,13aEOn?P00PD3wVMdLDRhgvL289?,0*02", true).unwrap();
/// assert_eq!(fields.channel, Some('A'));
/// assert_eq!(fields.fragment_count, 1);
/// assert_eq!(fields.sequence_id, "");
///
/// assert!(nmea::parse("!AIVDM,1,1,,A,13aEOn?P00PD3wVMdLDRhgvL289?,0*26", true).is_err());
/// ```
pub fn parse(line: &str, validate: bool) -> Result<SentenceFields, CodecError> {
    let (tag_block, sentence) = split_tag_block(line.trim())?;
    let (body, transmitted) = split_checksum(sentence)?;

    match (validate, transmitted) {
        (true, None) => return Err(CodecError::malformed("missing checksum")),
        (true, Some(expected)) => {
            let computed = checksum(body);
            if computed != expected {
                return Err(CodecError::ChecksumMismatch { expected, computed });
            }
        }
        (false, _) => {}
    }

    let fields: Vec<&str> = body.split(',').collect();
    let address: SentenceAddress = fields[0]
        .parse()
        .map_err(|e: ais_models::ModelError| CodecError::malformed(e.to_string()))?;
    let fragment_count = numeric_field(&fields, 1, "fragment count", 1)?;
    let fragment_number = numeric_field(&fields, 2, "fragment number", 1)?;
    if fragment_count == 0 || fragment_number == 0 || fragment_number > fragment_count {
        return Err(CodecError::malformed(format!(
            "fragment {fragment_number} of {fragment_count} is out of range"
        )));
    }
    let sequence_id = fields.get(3).copied().unwrap_or_default().to_string();
    let channel = parse_channel(fields.get(4).copied().unwrap_or_default())
        .map_err(|e| CodecError::malformed(e.to_string()))?;
    let payload = fields
        .get(5)
        .copied()
        .ok_or_else(|| CodecError::malformed("missing payload field"))?
        .to_string();
    let fill_bits = numeric_field(&fields, 6, "fill bits", 0)?;
    if fill_bits > 5 {
        return Err(CodecError::malformed(format!("fill bits {fill_bits} exceed 5")));
    }

    Ok(SentenceFields {
        address,
        fragment_count,
        fragment_number,
        sequence_id,
        channel,
        payload,
        fill_bits,
        checksum: transmitted,
        tag_block: tag_block.map(str::to_string),
    })
}

/// Render fields as a complete sentence with checksum and CRLF.
///
/// # Examples
///
/// ```
/// use ais_codec::nmea;
/// use ais_models::SentenceFields;
///
/// let fields = SentenceFields::single("13aEOn?P00PD3wVMdLDRhgvL289?", 0, Some('A'));
/// assert_eq!(
///     nmea::build(&fields),
///     "!AIVDM,1,1,,A,13aEOn?P00PD3wVMdLDRhgvL289?,0*02\r\n",
/// );
/// ```
pub fn build(fields: &SentenceFields) -> String {
    let channel = fields.channel.map(String::from).unwrap_or_default();
    let body = format!(
        "{},{},{},{},{},{},{}",
        fields.address,
        fields.fragment_count,
        fields.fragment_number,
        fields.sequence_id,
        channel,
        fields.payload,
        fields.fill_bits,
    );
    let tag = fields
        .tag_block
        .as_deref()
        .map(|t| format!("\\{t}\\"))
        .unwrap_or_default();
    format!("{tag}!{body}*{:02X}\r\n", checksum(&body))
}

/// `true` when the sentence carries a checksum matching its body.
pub fn validate(line: &str) -> bool {
    let Ok((_, sentence)) = split_tag_block(line.trim()) else {
        return false;
    };
    matches!(split_checksum(sentence), Ok((body, Some(sum))) if checksum(body) == sum)
}

/// Receive time from the `c:` (UNIX time) parameter of a tag block.
///
/// Values above 10^11 are taken as milliseconds.
///
/// # Examples
///
/// ```
/// use ais_codec::nmea::tag_block_time;
///
/// let t = tag_block_time("s:2573135,c:1671620143*0B").unwrap();
/// assert_eq!(t.timestamp(), 1_671_620_143);
/// assert!(tag_block_time("s:2573135*7D").is_none());
/// ```
pub fn tag_block_time(tag_block: &str) -> Option<DateTime<Utc>> {
    let params = tag_block.split('*').next().unwrap_or_default();
    let value: i64 = params
        .split(',')
        .find_map(|p| p.strip_prefix("c:"))?
        .parse()
        .ok()?;
    if value > 100_000_000_000 {
        Utc.timestamp_millis_opt(value).single()
    } else {
        Utc.timestamp_opt(value, 0).single()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ais_models::SentenceFormatter;

    const FIXTURE: &str = "!AIVDM,1,1,,A,13aEOn?P00PD3wVMdLDRhgvL289?,0*26";

    #[test]
    fn fixture_checksum_field_does_not_match_body() {
        let body = "AIVDM,1,1,,A,13aEOn?P00PD3wVMdLDRhgvL289?,0";
        assert_eq!(checksum(body), 0x02);
        assert!(!validate(FIXTURE));
        assert_eq!(
            parse(FIXTURE, true).unwrap_err(),
            CodecError::ChecksumMismatch {
                expected: 0x26,
                computed: 0x02
            }
        );
    }

    #[test]
    fn lenient_parse_keeps_transmitted_checksum() {
        let fields = parse(FIXTURE, false).unwrap();
        assert_eq!(fields.checksum, Some(0x26));
        assert_eq!(fields.payload, "13aEOn?P00PD3wVMdLDRhgvL289?");
        assert_eq!(fields.fill_bits, 0);
        assert_eq!(fields.address.formatter, SentenceFormatter::Vdm);
    }

    #[test]
    fn multipart_fields() {
        let fields = parse("!AIVDM,2,2,1,A,88888888880,2*25", true).unwrap();
        assert_eq!(fields.fragment_count, 2);
        assert_eq!(fields.fragment_number, 2);
        assert_eq!(fields.sequence_id, "1");
        assert_eq!(fields.fill_bits, 2);
        assert!(fields.is_multipart());
        assert!(fields.is_last_fragment());
    }

    #[test]
    fn lowercase_checksum_accepted() {
        let line = "!AIVDM,5,1,3,B,55?MbV02;H;s<Ht,0*6d";
        assert!(validate(line));
        assert!(parse(line, true).is_ok());
    }

    #[test]
    fn own_vessel_and_dollar_delimiter() {
        let mut fields = SentenceFields::single("B6CdCm0t3`tba35f@V9faHi7kP06", 0, Some('B'));
        fields.address = SentenceAddress::new("AI", SentenceFormatter::Vdo);
        let line = build(&fields).replacen('!', "$", 1);
        let parsed = parse(&line, true).unwrap();
        assert!(parsed.own_vessel());
    }

    #[test]
    fn tag_block_is_stripped_and_kept() {
        let line = "\\s:2573135,c:1671620143*0B\\!AIVDM,1,1,,A,13aEOn?P00PD3wVMdLDRhgvL289?,0*02";
        let fields = parse(line, true).unwrap();
        assert_eq!(fields.tag_block.as_deref(), Some("s:2573135,c:1671620143*0B"));
        assert!(validate(line));
        let t = tag_block_time(fields.tag_block.as_deref().unwrap()).unwrap();
        assert_eq!(t.timestamp(), 1_671_620_143);
        assert_eq!(build(&fields), format!("{line}\r\n"));
    }

    #[test]
    fn millisecond_tag_time() {
        let t = tag_block_time("c:1671620143123").unwrap();
        assert_eq!(t.timestamp_millis(), 1_671_620_143_123);
    }

    #[test]
    fn malformed_inputs() {
        let cases = [
            "",
            "AIVDM,1,1,,A,13aEOn,0*00",
            "!AIVDM,1,1,,A,13aEOn?P00PD3wVMdLDRhgvL289?,0",
            "!AIVDM,1,1,,A,13aEOn?P00PD3wVMdLDRhgvL289?,0*2",
            "\\c:1671620143!AIVDM,1,1,,A,13aEOn,0*00",
        ];
        for case in cases {
            assert!(
                matches!(parse(case, true), Err(CodecError::MalformedSentence { .. })),
                "{case:?}"
            );
        }
    }

    #[test]
    fn field_range_checks() {
        let body = |b: &str| format!("!{b}*{:02X}", checksum(b));
        for b in [
            "AIVDM,2,3,1,A,13aEOn,0",
            "AIVDM,0,0,,A,13aEOn,0",
            "AIVDM,1,1,,A,13aEOn,6",
            "AIVDM,x,1,,A,13aEOn,0",
            "AIVDM,1,1,,AB,13aEOn,0",
            "GPGGA,1,1,,A,13aEOn,0",
            "AIVDM,1,1,,A",
        ] {
            assert!(
                matches!(parse(&body(b), true), Err(CodecError::MalformedSentence { .. })),
                "{b}"
            );
        }
    }

    #[test]
    fn missing_trailing_fields_default() {
        let b = "AIVDM,,,,,13aEOn";
        let fields = parse(&format!("!{b}*{:02X}", checksum(b)), true).unwrap();
        assert_eq!(fields.fragment_count, 1);
        assert_eq!(fields.fragment_number, 1);
        assert_eq!(fields.channel, None);
        assert_eq!(fields.fill_bits, 0);
    }

    #[test]
    fn build_then_validate_and_mutation_breaks_it() {
        let fields = SentenceFields::single("55?MbV02;H;s<HtKR20EHE:0@T4@Dn2222222216L961O5Gf0NSQEp6ClRp8", 0, Some('A'));
        let line = build(&fields);
        assert!(line.ends_with("\r\n"));
        assert!(validate(&line));
        let star = line.find('*').unwrap();
        for i in 15..star - 2 {
            let mut bytes = line.clone().into_bytes();
            bytes[i] = if bytes[i] == b'0' { b'1' } else { b'0' };
            let mutated = String::from_utf8(bytes).unwrap();
            assert!(!validate(&mutated), "mutation at {i} went unnoticed");
        }
    }
}
