//! Per-type message layouts: [`decode`] and [`encode`] between a bit
//! sequence and an [`AisMessage`].
//!
//! Every layout starts with the same 38-bit header:
//!
//! ```text
//! bit  0       6  8                              38
//!      | type  |ri| mmsi                          | type-specific fields ...
//! ```
//!
//! The per-group modules hold one `decode_*` / `encode_*` pair per record.
//! Decoders are called with the reader positioned at bit 38 and read
//! strictly in layout order; any field past the end fails the whole decode.

mod binary;
mod management;
mod position;
mod voyage;

use ais_models::{AisMessage, Dimensions, Header};

use crate::bits::{BitReader, BitWriter, Bits};
use crate::error::CodecError;

/// Width of the common header (type, repeat indicator, MMSI).
pub const HEADER_BITS: usize = 38;

fn read_header(r: &mut BitReader<'_>) -> Result<(u8, Header), CodecError> {
    let message_type = r.u8(6)?;
    let repeat_indicator = r.u8(2)?;
    let mmsi = r.u32(30)?;
    Ok((
        message_type,
        Header {
            repeat_indicator,
            mmsi,
        },
    ))
}

fn write_header(w: &mut BitWriter, message_type: u8, header: &Header) -> Result<(), CodecError> {
    w.put_uint("message_type", message_type, 6)?;
    w.put_uint("repeat_indicator", header.repeat_indicator, 2)?;
    w.put_uint("mmsi", header.mmsi, 30)
}

/// The 6-bit type id at the start of `bits`, without decoding further.
pub fn peek_type(bits: &Bits) -> Result<u8, CodecError> {
    let raw = bits.uint(0, 6)?;
    // six bits always fit
    Ok(u8::try_from(raw).unwrap_or_default())
}

/// Decode one message from its complete bit sequence (fill bits removed).
///
/// Type ids without a layout (0, 28–63) decode to [`AisMessage::Unknown`].
///
/// # Examples
///
/// ```
/// use ais_codec::{codec, sixbit};
/// use ais_models::AisMessage;
///
/// let bits = sixbit::decode("13aEOn?P00PD3wVMdLDRhgvL289?");
/// let AisMessage::PositionReportScheduled(report) = codec::decode(&bits).unwrap() else {
///     panic!("expected a type 1 report");
/// };
/// assert_eq!(report.header.mmsi, 244_670_424);
/// assert_eq!(report.true_heading, 511);
/// ```
pub fn decode(bits: &Bits) -> Result<AisMessage, CodecError> {
    let mut r = BitReader::new(bits);
    let (message_type, header) = read_header(&mut r)?;
    let r = &mut r;
    Ok(match message_type {
        1 => AisMessage::PositionReportScheduled(position::decode_position_report(r, header)?),
        2 => AisMessage::PositionReportAssigned(position::decode_position_report(r, header)?),
        3 => AisMessage::PositionReportInterrogated(position::decode_position_report(r, header)?),
        4 => AisMessage::BaseStationReport(position::decode_base_station(r, header)?),
        5 => AisMessage::StaticVoyageData(voyage::decode_static_voyage(r, header)?),
        6 => AisMessage::AddressedBinary(binary::decode_addressed_binary(r, header)?),
        7 => AisMessage::BinaryAcknowledge(binary::decode_acknowledge(r, header)?),
        8 => AisMessage::BinaryBroadcast(binary::decode_binary_broadcast(r, header)?),
        9 => AisMessage::SarAircraftReport(position::decode_sar_aircraft(r, header)?),
        10 => AisMessage::UtcInquiry(management::decode_utc_inquiry(r, header)?),
        11 => AisMessage::UtcDateResponse(position::decode_base_station(r, header)?),
        12 => AisMessage::AddressedSafety(binary::decode_addressed_safety(r, header)?),
        13 => AisMessage::SafetyAcknowledge(binary::decode_acknowledge(r, header)?),
        14 => AisMessage::SafetyBroadcast(binary::decode_safety_broadcast(r, header)?),
        15 => AisMessage::Interrogation(management::decode_interrogation(r, header)?),
        16 => AisMessage::AssignmentModeCommand(management::decode_assignment(r, header)?),
        17 => AisMessage::DgnssBroadcast(binary::decode_dgnss(r, header)?),
        18 => AisMessage::ClassBPositionReport(position::decode_class_b(r, header)?),
        19 => AisMessage::ExtendedClassBReport(position::decode_extended_class_b(r, header)?),
        20 => AisMessage::DataLinkManagement(management::decode_data_link(r, header)?),
        21 => AisMessage::AidToNavigationReport(voyage::decode_aid_to_navigation(r, header)?),
        22 => AisMessage::ChannelManagement(management::decode_channel_management(r, header)?),
        23 => AisMessage::GroupAssignmentCommand(management::decode_group_assignment(r, header)?),
        24 => AisMessage::StaticDataReport(voyage::decode_static_data(r, header)?),
        25 => AisMessage::SingleSlotBinary(binary::decode_single_slot(r, header)?),
        26 => AisMessage::MultipleSlotBinary(binary::decode_multiple_slot(r, header)?),
        27 => AisMessage::LongRangeReport(position::decode_long_range(r, header)?),
        other => AisMessage::Unknown {
            message_type: other,
            header,
        },
    })
}

/// Encode a message into its bit sequence (before armoring).
///
/// Fails with [`CodecError::InvalidEncodeDomain`] when a field value cannot
/// be represented, and [`CodecError::UnsupportedLayout`] for an
/// [`AisMessage::Unknown`] carrying a type id that has a layout.
pub fn encode(message: &AisMessage) -> Result<Bits, CodecError> {
    let mut w = BitWriter::new();
    let message_type = message.message_type();
    write_header(&mut w, message_type, message.header())?;
    let w_ref = &mut w;
    match message {
        AisMessage::PositionReportScheduled(m)
        | AisMessage::PositionReportAssigned(m)
        | AisMessage::PositionReportInterrogated(m) => position::encode_position_report(w_ref, m)?,
        AisMessage::BaseStationReport(m) | AisMessage::UtcDateResponse(m) => {
            position::encode_base_station(w_ref, m)?;
        }
        AisMessage::StaticVoyageData(m) => voyage::encode_static_voyage(w_ref, m)?,
        AisMessage::AddressedBinary(m) => binary::encode_addressed_binary(w_ref, m)?,
        AisMessage::BinaryAcknowledge(m) | AisMessage::SafetyAcknowledge(m) => {
            binary::encode_acknowledge(w_ref, m)?;
        }
        AisMessage::BinaryBroadcast(m) => binary::encode_binary_broadcast(w_ref, m)?,
        AisMessage::SarAircraftReport(m) => position::encode_sar_aircraft(w_ref, m)?,
        AisMessage::UtcInquiry(m) => management::encode_utc_inquiry(w_ref, m)?,
        AisMessage::AddressedSafety(m) => binary::encode_addressed_safety(w_ref, m)?,
        AisMessage::SafetyBroadcast(m) => binary::encode_safety_broadcast(w_ref, m),
        AisMessage::Interrogation(m) => management::encode_interrogation(w_ref, m)?,
        AisMessage::AssignmentModeCommand(m) => management::encode_assignment(w_ref, m)?,
        AisMessage::DgnssBroadcast(m) => binary::encode_dgnss(w_ref, m)?,
        AisMessage::ClassBPositionReport(m) => position::encode_class_b(w_ref, m)?,
        AisMessage::ExtendedClassBReport(m) => position::encode_extended_class_b(w_ref, m)?,
        AisMessage::DataLinkManagement(m) => management::encode_data_link(w_ref, m)?,
        AisMessage::AidToNavigationReport(m) => voyage::encode_aid_to_navigation(w_ref, m)?,
        AisMessage::ChannelManagement(m) => management::encode_channel_management(w_ref, m)?,
        AisMessage::GroupAssignmentCommand(m) => management::encode_group_assignment(w_ref, m)?,
        AisMessage::StaticDataReport(m) => voyage::encode_static_data(w_ref, m)?,
        AisMessage::SingleSlotBinary(m) => binary::encode_single_slot(w_ref, m)?,
        AisMessage::MultipleSlotBinary(m) => binary::encode_multiple_slot(w_ref, m)?,
        AisMessage::LongRangeReport(m) => position::encode_long_range(w_ref, m)?,
        AisMessage::Unknown { message_type, .. } => {
            if (1..=27).contains(message_type) {
                return Err(CodecError::UnsupportedLayout {
                    message_type: *message_type,
                    reason: "header-only record for a type with a layout".to_string(),
                });
            }
        }
    }
    Ok(w.finish())
}

/// Encode a dimensions block (bow 9, stern 9, port 6, starboard 6).
fn encode_dimensions(w: &mut BitWriter, d: &Dimensions) -> Result<(), CodecError> {
    w.put_uint("to_bow", d.to_bow, 9)?;
    w.put_uint("to_stern", d.to_stern, 9)?;
    w.put_uint("to_port", d.to_port, 6)?;
    w.put_uint("to_starboard", d.to_starboard, 6)
}

fn decode_dimensions(r: &mut BitReader<'_>) -> Result<Dimensions, CodecError> {
    Ok(Dimensions {
        to_bow: r.u16(9)?,
        to_stern: r.u16(9)?,
        to_port: r.u8(6)?,
        to_starboard: r.u8(6)?,
    })
}

/// Bits of a variable-length 6-bit text run: whole characters only, capped
/// at `max_chars`.
fn text_bits(available: usize, max_chars: usize) -> usize {
    (available / 6).min(max_chars) * 6
}
