//! Static and voyage layouts: 5, 21 and 24.

use ais_models::{
    is_auxiliary_craft, AidToNavigationReport, EpfdType, Eta, Header, ShipReference,
    StaticDataPart, StaticDataReport, StaticVoyageData,
};

use super::{decode_dimensions, encode_dimensions, text_bits};
use crate::bits::{BitReader, BitWriter};
use crate::error::CodecError;

/// Characters in the optional type 21 name extension.
const NAME_EXTENSION_CHARS: usize = 14;
const DESTINATION_BITS: usize = 120;
/// Destination bits present in a 420-bit type 5.
const SHORT_DESTINATION_BITS: usize = 118;

// ---------------------------------------------------------------------------
// Type 5
// ---------------------------------------------------------------------------

pub(super) fn decode_static_voyage(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<StaticVoyageData, CodecError> {
    let ais_version = r.u8(2)?;
    let imo = r.u32(30)?;
    let callsign = r.string(42)?;
    let vessel_name = r.string(120)?;
    let ship_type = r.u8(8)?;
    let dimensions = decode_dimensions(r)?;
    let epfd = EpfdType::from(r.u8(4)?);
    let eta = Eta {
        month: r.u8(4)?,
        day: r.u8(5)?,
        hour: r.u8(5)?,
        minute: r.u8(6)?,
    };
    let draught = f64::from(r.u8(8)?) / 10.0;
    // some class A transponders stop at 420 bits, cutting the last
    // destination character short and dropping the DTE flag
    if r.remaining() < SHORT_DESTINATION_BITS {
        return Err(CodecError::TruncatedPayload {
            offset: r.position(),
            len: DESTINATION_BITS,
            available: r.len(),
        });
    }
    let destination_bits = text_bits(r.remaining(), DESTINATION_BITS / 6);
    let destination = r.string(destination_bits)?;
    let dte = if destination_bits == DESTINATION_BITS && r.remaining() > 0 {
        r.bool()?
    } else {
        false
    };
    Ok(StaticVoyageData {
        header,
        ais_version,
        imo,
        callsign,
        vessel_name,
        ship_type,
        dimensions,
        epfd,
        eta,
        draught,
        destination,
        dte,
    })
}

pub(super) fn encode_static_voyage(w: &mut BitWriter, m: &StaticVoyageData) -> Result<(), CodecError> {
    w.put_uint("ais_version", m.ais_version, 2)?;
    w.put_uint("imo", m.imo, 30)?;
    w.put_string(&m.callsign, 42);
    w.put_string(&m.vessel_name, 120);
    w.put_uint("ship_type", m.ship_type, 8)?;
    encode_dimensions(w, &m.dimensions)?;
    w.put_uint("epfd", m.epfd.value(), 4)?;
    w.put_uint("eta_month", m.eta.month, 4)?;
    w.put_uint("eta_day", m.eta.day, 5)?;
    w.put_uint("eta_hour", m.eta.hour, 5)?;
    w.put_uint("eta_minute", m.eta.minute, 6)?;
    if !m.draught.is_finite() || m.draught < 0.0 {
        return Err(CodecError::domain("draught", format!("{} is not a draught", m.draught)));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let draught = (m.draught * 10.0).round() as u64;
    w.put_uint("draught", draught, 8)?;
    w.put_string(&m.destination, DESTINATION_BITS);
    w.put_bool(m.dte);
    w.put_padding(1);
    Ok(())
}

// ---------------------------------------------------------------------------
// Type 21
// ---------------------------------------------------------------------------

pub(super) fn decode_aid_to_navigation(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<AidToNavigationReport, CodecError> {
    let aid_type = r.u8(5)?;
    let name = r.string(120)?;
    let position_accuracy = r.bool()?;
    let longitude = r.longitude(28)?;
    let latitude = r.latitude(27)?;
    let dimensions = decode_dimensions(r)?;
    let epfd = EpfdType::from(r.u8(4)?);
    let second = r.u8(6)?;
    let off_position = r.bool()?;
    let regional = r.u8(8)?;
    let raim = r.bool()?;
    let virtual_aid = r.bool()?;
    let assigned = r.bool()?;
    r.skip(1)?;
    let name_extension = r.string(text_bits(r.remaining(), NAME_EXTENSION_CHARS))?;
    Ok(AidToNavigationReport {
        header,
        aid_type,
        name,
        position_accuracy,
        longitude,
        latitude,
        dimensions,
        epfd,
        second,
        off_position,
        regional,
        raim,
        virtual_aid,
        assigned,
        name_extension,
    })
}

pub(super) fn encode_aid_to_navigation(
    w: &mut BitWriter,
    m: &AidToNavigationReport,
) -> Result<(), CodecError> {
    w.put_uint("aid_type", m.aid_type, 5)?;
    w.put_string(&m.name, 120);
    w.put_bool(m.position_accuracy);
    w.put_longitude("longitude", m.longitude, 28)?;
    w.put_latitude("latitude", m.latitude, 27)?;
    encode_dimensions(w, &m.dimensions)?;
    w.put_uint("epfd", m.epfd.value(), 4)?;
    w.put_uint("second", m.second, 6)?;
    w.put_bool(m.off_position);
    w.put_uint("regional", m.regional, 8)?;
    w.put_bool(m.raim);
    w.put_bool(m.virtual_aid);
    w.put_bool(m.assigned);
    w.put_padding(1);
    let extension_chars = m.name_extension.chars().count().min(NAME_EXTENSION_CHARS);
    w.put_string(&m.name_extension, extension_chars * 6);
    Ok(())
}

// ---------------------------------------------------------------------------
// Type 24
// ---------------------------------------------------------------------------

pub(super) fn decode_static_data(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<StaticDataReport, CodecError> {
    let part = match r.u8(2)? {
        0 => StaticDataPart::A {
            vessel_name: r.string(120)?,
        },
        1 => {
            let ship_type = r.u8(8)?;
            let vendor_id = r.string(18)?;
            let model = r.u8(4)?;
            let serial = r.u32(20)?;
            let callsign = r.string(42)?;
            let reference = if is_auxiliary_craft(header.mmsi) {
                ShipReference::Mothership(r.u32(30)?)
            } else {
                ShipReference::Dimensions(decode_dimensions(r)?)
            };
            StaticDataPart::B {
                ship_type,
                vendor_id,
                model,
                serial,
                callsign,
                reference,
            }
        }
        other => {
            return Err(CodecError::UnsupportedLayout {
                message_type: 24,
                reason: format!("part number {other}"),
            })
        }
    };
    Ok(StaticDataReport { header, part })
}

pub(super) fn encode_static_data(w: &mut BitWriter, m: &StaticDataReport) -> Result<(), CodecError> {
    w.put_uint("part_number", m.part_number(), 2)?;
    match &m.part {
        StaticDataPart::A { vessel_name } => w.put_string(vessel_name, 120),
        StaticDataPart::B {
            ship_type,
            vendor_id,
            model,
            serial,
            callsign,
            reference,
        } => {
            w.put_uint("ship_type", *ship_type, 8)?;
            w.put_string(vendor_id, 18);
            w.put_uint("model", *model, 4)?;
            w.put_uint("serial", *serial, 20)?;
            w.put_string(callsign, 42);
            check_reference(m.header.mmsi, reference)?;
            match reference {
                ShipReference::Dimensions(d) => encode_dimensions(w, d)?,
                ShipReference::Mothership(mmsi) => w.put_uint("mothership_mmsi", *mmsi, 30)?,
            }
            w.put_padding(6);
        }
    }
    Ok(())
}

/// Part B carries a mothership MMSI exactly when the sender is an auxiliary
/// craft; any other pairing would decode as a different record.
fn check_reference(mmsi: u32, reference: &ShipReference) -> Result<(), CodecError> {
    match (is_auxiliary_craft(mmsi), reference) {
        (true, ShipReference::Dimensions(_)) => Err(CodecError::domain(
            "reference",
            format!("auxiliary craft {mmsi} must reference its mothership"),
        )),
        (false, ShipReference::Mothership(_)) => Err(CodecError::domain(
            "reference",
            format!("{mmsi} is not an auxiliary craft and must carry dimensions"),
        )),
        _ => Ok(()),
    }
}
