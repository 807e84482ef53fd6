//! Link-management layouts: 10, 15, 16, 20, 22 and 23.

use ais_models::{
    AssignmentModeCommand, ChannelArea, ChannelManagement, DataLinkManagement,
    GroupAssignmentCommand, Header, Interrogation, SecondInterrogation, SlotAssignment,
    SlotRequest, SlotReservation, UtcInquiry,
};

use crate::bits::{BitReader, BitWriter};
use crate::error::CodecError;

const MAX_RESERVATIONS: usize = 4;
/// Bit offset of the type 22 "addressed" flag, which selects how bits
/// 69..139 are laid out.
const CHANNEL_ADDRESSED_BIT: usize = 139;

// ---------------------------------------------------------------------------
// Type 10
// ---------------------------------------------------------------------------

pub(super) fn decode_utc_inquiry(r: &mut BitReader<'_>, header: Header) -> Result<UtcInquiry, CodecError> {
    r.skip(2)?;
    let dest_mmsi = r.u32(30)?;
    Ok(UtcInquiry { header, dest_mmsi })
}

pub(super) fn encode_utc_inquiry(w: &mut BitWriter, m: &UtcInquiry) -> Result<(), CodecError> {
    w.put_padding(2);
    w.put_uint("dest_mmsi", m.dest_mmsi, 30)?;
    w.put_padding(2);
    Ok(())
}

// ---------------------------------------------------------------------------
// Type 15
// ---------------------------------------------------------------------------

fn decode_slot_request(r: &mut BitReader<'_>) -> Result<SlotRequest, CodecError> {
    Ok(SlotRequest {
        message_type: r.u8(6)?,
        slot_offset: r.u16(12)?,
    })
}

fn encode_slot_request(w: &mut BitWriter, request: SlotRequest) -> Result<(), CodecError> {
    w.put_uint("message_type", request.message_type, 6)?;
    w.put_uint("slot_offset", request.slot_offset, 12)
}

pub(super) fn decode_interrogation(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<Interrogation, CodecError> {
    r.skip(2)?;
    let mmsi = r.u32(30)?;
    let first_request_1 = decode_slot_request(r)?;
    let first_request_2 = if r.len() >= 110 {
        r.skip(2)?;
        let request = decode_slot_request(r)?;
        r.skip(2)?;
        Some(request)
    } else {
        None
    };
    let second = if r.len() >= 160 {
        let mmsi = r.u32(30)?;
        let request = decode_slot_request(r)?;
        r.skip(2)?;
        Some(SecondInterrogation { mmsi, request })
    } else {
        None
    };
    Ok(Interrogation {
        header,
        mmsi,
        first_request_1,
        first_request_2,
        second,
    })
}

pub(super) fn encode_interrogation(w: &mut BitWriter, m: &Interrogation) -> Result<(), CodecError> {
    w.put_padding(2);
    w.put_uint("mmsi", m.mmsi, 30)?;
    encode_slot_request(w, m.first_request_1)?;
    // a second station needs the full 160-bit layout, so an absent
    // request 2 is written as zeros
    if m.first_request_2.is_some() || m.second.is_some() {
        w.put_padding(2);
        encode_slot_request(w, m.first_request_2.unwrap_or_default())?;
        w.put_padding(2);
    }
    if let Some(second) = m.second {
        w.put_uint("second_mmsi", second.mmsi, 30)?;
        encode_slot_request(w, second.request)?;
        w.put_padding(2);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Type 16
// ---------------------------------------------------------------------------

fn decode_slot_assignment(r: &mut BitReader<'_>) -> Result<SlotAssignment, CodecError> {
    Ok(SlotAssignment {
        mmsi: r.u32(30)?,
        offset: r.u16(12)?,
        increment: r.u16(10)?,
    })
}

pub(super) fn decode_assignment(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<AssignmentModeCommand, CodecError> {
    r.skip(2)?;
    let mut assignments = vec![decode_slot_assignment(r)?];
    if r.remaining() >= 52 {
        assignments.push(decode_slot_assignment(r)?);
    }
    Ok(AssignmentModeCommand {
        header,
        assignments,
    })
}

pub(super) fn encode_assignment(w: &mut BitWriter, m: &AssignmentModeCommand) -> Result<(), CodecError> {
    let count = m.assignments.len();
    if !(1..=2).contains(&count) {
        return Err(CodecError::domain(
            "assignments",
            format!("{count} entries, expected 1 or 2"),
        ));
    }
    w.put_padding(2);
    for assignment in &m.assignments {
        w.put_uint("mmsi", assignment.mmsi, 30)?;
        w.put_uint("offset", assignment.offset, 12)?;
        w.put_uint("increment", assignment.increment, 10)?;
    }
    if count == 1 {
        w.put_padding(4);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Type 20
// ---------------------------------------------------------------------------

pub(super) fn decode_data_link(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<DataLinkManagement, CodecError> {
    r.skip(2)?;
    let count = (r.remaining() / 30).clamp(1, MAX_RESERVATIONS);
    let reservations = (0..count)
        .map(|_| {
            Ok(SlotReservation {
                offset: r.u16(12)?,
                number: r.u8(4)?,
                timeout: r.u8(3)?,
                increment: r.u16(11)?,
            })
        })
        .collect::<Result<Vec<_>, CodecError>>()?;
    Ok(DataLinkManagement {
        header,
        reservations,
    })
}

pub(super) fn encode_data_link(w: &mut BitWriter, m: &DataLinkManagement) -> Result<(), CodecError> {
    let count = m.reservations.len();
    if !(1..=MAX_RESERVATIONS).contains(&count) {
        return Err(CodecError::domain(
            "reservations",
            format!("{count} entries, expected 1 to {MAX_RESERVATIONS}"),
        ));
    }
    w.put_padding(2);
    for reservation in &m.reservations {
        w.put_uint("offset", reservation.offset, 12)?;
        w.put_uint("number", reservation.number, 4)?;
        w.put_uint("timeout", reservation.timeout, 3)?;
        w.put_uint("increment", reservation.increment, 11)?;
    }
    w.pad_to_byte();
    Ok(())
}

// ---------------------------------------------------------------------------
// Type 22
// ---------------------------------------------------------------------------

pub(super) fn decode_channel_management(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<ChannelManagement, CodecError> {
    r.skip(2)?;
    let channel_a = r.u16(12)?;
    let channel_b = r.u16(12)?;
    let txrx_mode = r.u8(4)?;
    let low_power = r.bool()?;
    let area = if r.bool_at(CHANNEL_ADDRESSED_BIT)? {
        let dest_mmsi_1 = r.u32(30)?;
        r.skip(5)?;
        let dest_mmsi_2 = r.u32(30)?;
        r.skip(5)?;
        ChannelArea::Addressed {
            dest_mmsi_1,
            dest_mmsi_2,
        }
    } else {
        ChannelArea::Region {
            ne_longitude: r.longitude(18)?,
            ne_latitude: r.latitude(17)?,
            sw_longitude: r.longitude(18)?,
            sw_latitude: r.latitude(17)?,
        }
    };
    // the addressed flag was already consumed above
    r.skip(1)?;
    let band_a = r.bool()?;
    let band_b = r.bool()?;
    let zone_size = r.u8(3)?;
    r.skip(23)?;
    Ok(ChannelManagement {
        header,
        channel_a,
        channel_b,
        txrx_mode,
        low_power,
        area,
        band_a,
        band_b,
        zone_size,
    })
}

pub(super) fn encode_channel_management(
    w: &mut BitWriter,
    m: &ChannelManagement,
) -> Result<(), CodecError> {
    w.put_padding(2);
    w.put_uint("channel_a", m.channel_a, 12)?;
    w.put_uint("channel_b", m.channel_b, 12)?;
    w.put_uint("txrx_mode", m.txrx_mode, 4)?;
    w.put_bool(m.low_power);
    match m.area {
        ChannelArea::Addressed {
            dest_mmsi_1,
            dest_mmsi_2,
        } => {
            w.put_uint("dest_mmsi_1", dest_mmsi_1, 30)?;
            w.put_padding(5);
            w.put_uint("dest_mmsi_2", dest_mmsi_2, 30)?;
            w.put_padding(5);
            w.put_bool(true);
        }
        ChannelArea::Region {
            ne_longitude,
            ne_latitude,
            sw_longitude,
            sw_latitude,
        } => {
            w.put_longitude("ne_longitude", ne_longitude, 18)?;
            w.put_latitude("ne_latitude", ne_latitude, 17)?;
            w.put_longitude("sw_longitude", sw_longitude, 18)?;
            w.put_latitude("sw_latitude", sw_latitude, 17)?;
            w.put_bool(false);
        }
    }
    w.put_bool(m.band_a);
    w.put_bool(m.band_b);
    w.put_uint("zone_size", m.zone_size, 3)?;
    w.put_padding(23);
    Ok(())
}

// ---------------------------------------------------------------------------
// Type 23
// ---------------------------------------------------------------------------

pub(super) fn decode_group_assignment(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<GroupAssignmentCommand, CodecError> {
    r.skip(2)?;
    let ne_longitude = r.longitude(18)?;
    let ne_latitude = r.latitude(17)?;
    let sw_longitude = r.longitude(18)?;
    let sw_latitude = r.latitude(17)?;
    let station_type = r.u8(4)?;
    let ship_type = r.u8(8)?;
    r.skip(22)?;
    let txrx_mode = r.u8(2)?;
    let report_interval = r.u8(4)?;
    let quiet_time = r.u8(4)?;
    r.skip(6)?;
    Ok(GroupAssignmentCommand {
        header,
        ne_longitude,
        ne_latitude,
        sw_longitude,
        sw_latitude,
        station_type,
        ship_type,
        txrx_mode,
        report_interval,
        quiet_time,
    })
}

pub(super) fn encode_group_assignment(
    w: &mut BitWriter,
    m: &GroupAssignmentCommand,
) -> Result<(), CodecError> {
    w.put_padding(2);
    w.put_longitude("ne_longitude", m.ne_longitude, 18)?;
    w.put_latitude("ne_latitude", m.ne_latitude, 17)?;
    w.put_longitude("sw_longitude", m.sw_longitude, 18)?;
    w.put_latitude("sw_latitude", m.sw_latitude, 17)?;
    w.put_uint("station_type", m.station_type, 4)?;
    w.put_uint("ship_type", m.ship_type, 8)?;
    w.put_padding(22);
    w.put_uint("txrx_mode", m.txrx_mode, 2)?;
    w.put_uint("report_interval", m.report_interval, 4)?;
    w.put_uint("quiet_time", m.quiet_time, 4)?;
    w.put_padding(6);
    Ok(())
}
