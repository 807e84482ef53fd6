//! Binary and safety layouts: 6, 7/13, 8, 12, 14, 17, 25 and 26.
//!
//! Application data is never interpreted here; it is carried as a
//! [`BinaryPayload`](ais_models::BinaryPayload) covering every bit up to the
//! end of the message (or up to the radio status for type 26).

use ais_models::{
    Acknowledge, Acknowledgement, AddressedBinary, AddressedSafety, ApplicationId,
    BinaryBroadcast, DgnssBroadcast, Header, MultipleSlotBinary, SafetyBroadcast,
    SingleSlotBinary,
};

use super::text_bits;
use crate::bits::{BitReader, BitWriter};
use crate::error::CodecError;

const ADDRESSED_SAFETY_CHARS: usize = 156;
const SAFETY_BROADCAST_CHARS: usize = 161;
const MAX_ACKNOWLEDGEMENTS: usize = 4;
const SINGLE_SLOT_BITS: usize = 168;

fn decode_application_id(r: &mut BitReader<'_>) -> Result<ApplicationId, CodecError> {
    Ok(ApplicationId {
        dac: r.u16(10)?,
        fid: r.u8(6)?,
    })
}

fn encode_application_id(w: &mut BitWriter, id: ApplicationId) -> Result<(), CodecError> {
    w.put_uint("dac", id.dac, 10)?;
    w.put_uint("fid", id.fid, 6)
}

fn put_text(w: &mut BitWriter, text: &str, max_chars: usize) {
    let chars = text.chars().count().min(max_chars);
    w.put_string(text, chars * 6);
}

// ---------------------------------------------------------------------------
// Type 6
// ---------------------------------------------------------------------------

pub(super) fn decode_addressed_binary(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<AddressedBinary, CodecError> {
    let sequence_number = r.u8(2)?;
    let dest_mmsi = r.u32(30)?;
    let retransmit = r.bool()?;
    r.skip(1)?;
    let application_id = decode_application_id(r)?;
    let data = r.payload(r.remaining())?;
    Ok(AddressedBinary {
        header,
        sequence_number,
        dest_mmsi,
        retransmit,
        application_id,
        data,
    })
}

pub(super) fn encode_addressed_binary(w: &mut BitWriter, m: &AddressedBinary) -> Result<(), CodecError> {
    w.put_uint("sequence_number", m.sequence_number, 2)?;
    w.put_uint("dest_mmsi", m.dest_mmsi, 30)?;
    w.put_bool(m.retransmit);
    w.put_padding(1);
    encode_application_id(w, m.application_id)?;
    w.put_payload(&m.data);
    Ok(())
}

// ---------------------------------------------------------------------------
// Types 7, 13
// ---------------------------------------------------------------------------

pub(super) fn decode_acknowledge(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<Acknowledge, CodecError> {
    r.skip(2)?;
    let count = (r.remaining() / 32).clamp(1, MAX_ACKNOWLEDGEMENTS);
    let acknowledgements = (0..count)
        .map(|_| {
            Ok(Acknowledgement {
                mmsi: r.u32(30)?,
                sequence_number: r.u8(2)?,
            })
        })
        .collect::<Result<Vec<_>, CodecError>>()?;
    Ok(Acknowledge {
        header,
        acknowledgements,
    })
}

pub(super) fn encode_acknowledge(w: &mut BitWriter, m: &Acknowledge) -> Result<(), CodecError> {
    let count = m.acknowledgements.len();
    if !(1..=MAX_ACKNOWLEDGEMENTS).contains(&count) {
        return Err(CodecError::domain(
            "acknowledgements",
            format!("{count} entries, expected 1 to {MAX_ACKNOWLEDGEMENTS}"),
        ));
    }
    w.put_padding(2);
    for ack in &m.acknowledgements {
        w.put_uint("mmsi", ack.mmsi, 30)?;
        w.put_uint("sequence_number", ack.sequence_number, 2)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Type 8
// ---------------------------------------------------------------------------

pub(super) fn decode_binary_broadcast(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<BinaryBroadcast, CodecError> {
    r.skip(2)?;
    let application_id = decode_application_id(r)?;
    let data = r.payload(r.remaining())?;
    Ok(BinaryBroadcast {
        header,
        application_id,
        data,
    })
}

pub(super) fn encode_binary_broadcast(w: &mut BitWriter, m: &BinaryBroadcast) -> Result<(), CodecError> {
    w.put_padding(2);
    encode_application_id(w, m.application_id)?;
    w.put_payload(&m.data);
    Ok(())
}

// ---------------------------------------------------------------------------
// Types 12, 14
// ---------------------------------------------------------------------------

pub(super) fn decode_addressed_safety(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<AddressedSafety, CodecError> {
    let sequence_number = r.u8(2)?;
    let dest_mmsi = r.u32(30)?;
    let retransmit = r.bool()?;
    r.skip(1)?;
    let text = r.string(text_bits(r.remaining(), ADDRESSED_SAFETY_CHARS))?;
    Ok(AddressedSafety {
        header,
        sequence_number,
        dest_mmsi,
        retransmit,
        text,
    })
}

pub(super) fn encode_addressed_safety(w: &mut BitWriter, m: &AddressedSafety) -> Result<(), CodecError> {
    w.put_uint("sequence_number", m.sequence_number, 2)?;
    w.put_uint("dest_mmsi", m.dest_mmsi, 30)?;
    w.put_bool(m.retransmit);
    w.put_padding(1);
    put_text(w, &m.text, ADDRESSED_SAFETY_CHARS);
    Ok(())
}

pub(super) fn decode_safety_broadcast(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<SafetyBroadcast, CodecError> {
    r.skip(2)?;
    let text = r.string(text_bits(r.remaining(), SAFETY_BROADCAST_CHARS))?;
    Ok(SafetyBroadcast { header, text })
}

pub(super) fn encode_safety_broadcast(w: &mut BitWriter, m: &SafetyBroadcast) {
    w.put_padding(2);
    put_text(w, &m.text, SAFETY_BROADCAST_CHARS);
}

// ---------------------------------------------------------------------------
// Type 17
// ---------------------------------------------------------------------------

pub(super) fn decode_dgnss(r: &mut BitReader<'_>, header: Header) -> Result<DgnssBroadcast, CodecError> {
    r.skip(2)?;
    let longitude = r.longitude(18)?;
    let latitude = r.latitude(17)?;
    r.skip(5)?;
    let data = r.payload(r.remaining())?;
    Ok(DgnssBroadcast {
        header,
        longitude,
        latitude,
        data,
    })
}

pub(super) fn encode_dgnss(w: &mut BitWriter, m: &DgnssBroadcast) -> Result<(), CodecError> {
    w.put_padding(2);
    w.put_longitude("longitude", m.longitude, 18)?;
    w.put_latitude("latitude", m.latitude, 17)?;
    w.put_padding(5);
    w.put_payload(&m.data);
    Ok(())
}

// ---------------------------------------------------------------------------
// Types 25, 26
// ---------------------------------------------------------------------------

/// Addressed and structured flags, then the optional destination and
/// application id they announce.
fn decode_slot_prefix(
    r: &mut BitReader<'_>,
) -> Result<(Option<u32>, Option<ApplicationId>), CodecError> {
    let addressed = r.bool()?;
    let structured = r.bool()?;
    let dest_mmsi = if addressed { Some(r.u32(30)?) } else { None };
    let application_id = if structured {
        Some(decode_application_id(r)?)
    } else {
        None
    };
    Ok((dest_mmsi, application_id))
}

fn encode_slot_prefix(
    w: &mut BitWriter,
    dest_mmsi: Option<u32>,
    application_id: Option<ApplicationId>,
) -> Result<(), CodecError> {
    w.put_bool(dest_mmsi.is_some());
    w.put_bool(application_id.is_some());
    if let Some(mmsi) = dest_mmsi {
        w.put_uint("dest_mmsi", mmsi, 30)?;
    }
    if let Some(id) = application_id {
        encode_application_id(w, id)?;
    }
    Ok(())
}

pub(super) fn decode_single_slot(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<SingleSlotBinary, CodecError> {
    let (dest_mmsi, application_id) = decode_slot_prefix(r)?;
    let data = r.payload(r.remaining())?;
    Ok(SingleSlotBinary {
        header,
        dest_mmsi,
        application_id,
        data,
    })
}

pub(super) fn encode_single_slot(w: &mut BitWriter, m: &SingleSlotBinary) -> Result<(), CodecError> {
    encode_slot_prefix(w, m.dest_mmsi, m.application_id)?;
    w.put_payload(&m.data);
    if w.len() > SINGLE_SLOT_BITS {
        return Err(CodecError::domain(
            "data",
            format!("{} bits exceed one slot ({SINGLE_SLOT_BITS})", w.len()),
        ));
    }
    Ok(())
}

pub(super) fn decode_multiple_slot(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<MultipleSlotBinary, CodecError> {
    let (dest_mmsi, application_id) = decode_slot_prefix(r)?;
    let data_len = r
        .remaining()
        .checked_sub(20)
        .ok_or(CodecError::TruncatedPayload {
            offset: r.position(),
            len: 20,
            available: r.len(),
        })?;
    let data = r.payload(data_len)?;
    let radio_status = r.u32(20)?;
    Ok(MultipleSlotBinary {
        header,
        dest_mmsi,
        application_id,
        data,
        radio_status,
    })
}

pub(super) fn encode_multiple_slot(w: &mut BitWriter, m: &MultipleSlotBinary) -> Result<(), CodecError> {
    encode_slot_prefix(w, m.dest_mmsi, m.application_id)?;
    w.put_payload(&m.data);
    w.put_uint("radio_status", m.radio_status, 20)
}
