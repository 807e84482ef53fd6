//! Position report layouts: 1/2/3, 4/11, 9, 18, 19 and 27.

use ais_models::{
    BaseStationReport, ClassBPositionReport, EpfdType, ExtendedClassBReport, Header,
    LongRangeReport, ManeuverIndicator, NavigationStatus, PositionReport, SarAircraftReport,
};

use super::{decode_dimensions, encode_dimensions};
use crate::bits::{BitReader, BitWriter};
use crate::error::CodecError;

// ---------------------------------------------------------------------------
// Types 1, 2, 3
// ---------------------------------------------------------------------------

pub(super) fn decode_position_report(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<PositionReport, CodecError> {
    let nav_status = NavigationStatus::from(r.u8(4)?);
    let rate_of_turn = r.rate_of_turn()?;
    let speed_over_ground = r.speed()?;
    let position_accuracy = r.bool()?;
    let longitude = r.longitude(28)?;
    let latitude = r.latitude(27)?;
    let course_over_ground = r.course()?;
    let true_heading = r.u16(9)?;
    let second = r.u8(6)?;
    let maneuver = ManeuverIndicator::from(r.u8(2)?);
    r.skip(3)?;
    let raim = r.bool()?;
    let radio_status = r.u32(19)?;
    Ok(PositionReport {
        header,
        nav_status,
        rate_of_turn,
        speed_over_ground,
        position_accuracy,
        longitude,
        latitude,
        course_over_ground,
        true_heading,
        second,
        maneuver,
        raim,
        radio_status,
    })
}

pub(super) fn encode_position_report(w: &mut BitWriter, m: &PositionReport) -> Result<(), CodecError> {
    w.put_uint("nav_status", m.nav_status.value(), 4)?;
    w.put_rate_of_turn("rate_of_turn", m.rate_of_turn)?;
    w.put_speed("speed_over_ground", m.speed_over_ground)?;
    w.put_bool(m.position_accuracy);
    w.put_longitude("longitude", m.longitude, 28)?;
    w.put_latitude("latitude", m.latitude, 27)?;
    w.put_course("course_over_ground", m.course_over_ground)?;
    w.put_uint("true_heading", m.true_heading, 9)?;
    w.put_uint("second", m.second, 6)?;
    w.put_uint("maneuver", m.maneuver.value(), 2)?;
    w.put_padding(3);
    w.put_bool(m.raim);
    w.put_uint("radio_status", m.radio_status, 19)
}

// ---------------------------------------------------------------------------
// Types 4, 11
// ---------------------------------------------------------------------------

pub(super) fn decode_base_station(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<BaseStationReport, CodecError> {
    let year = r.u16(14)?;
    let month = r.u8(4)?;
    let day = r.u8(5)?;
    let hour = r.u8(5)?;
    let minute = r.u8(6)?;
    let second = r.u8(6)?;
    let position_accuracy = r.bool()?;
    let longitude = r.longitude(28)?;
    let latitude = r.latitude(27)?;
    let epfd = EpfdType::from(r.u8(4)?);
    r.skip(10)?;
    let raim = r.bool()?;
    let radio_status = r.u32(19)?;
    Ok(BaseStationReport {
        header,
        year,
        month,
        day,
        hour,
        minute,
        second,
        position_accuracy,
        longitude,
        latitude,
        epfd,
        raim,
        radio_status,
    })
}

pub(super) fn encode_base_station(w: &mut BitWriter, m: &BaseStationReport) -> Result<(), CodecError> {
    w.put_uint("year", m.year, 14)?;
    w.put_uint("month", m.month, 4)?;
    w.put_uint("day", m.day, 5)?;
    w.put_uint("hour", m.hour, 5)?;
    w.put_uint("minute", m.minute, 6)?;
    w.put_uint("second", m.second, 6)?;
    w.put_bool(m.position_accuracy);
    w.put_longitude("longitude", m.longitude, 28)?;
    w.put_latitude("latitude", m.latitude, 27)?;
    w.put_uint("epfd", m.epfd.value(), 4)?;
    w.put_padding(10);
    w.put_bool(m.raim);
    w.put_uint("radio_status", m.radio_status, 19)
}

// ---------------------------------------------------------------------------
// Type 9
// ---------------------------------------------------------------------------

pub(super) fn decode_sar_aircraft(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<SarAircraftReport, CodecError> {
    let altitude = r.u16(12)?;
    let speed_over_ground = r.u16(10)?;
    let position_accuracy = r.bool()?;
    let longitude = r.longitude(28)?;
    let latitude = r.latitude(27)?;
    let course_over_ground = r.course()?;
    let second = r.u8(6)?;
    let regional = r.u8(8)?;
    let dte = r.bool()?;
    r.skip(3)?;
    let assigned = r.bool()?;
    let raim = r.bool()?;
    let radio_status = r.u32(20)?;
    Ok(SarAircraftReport {
        header,
        altitude,
        speed_over_ground,
        position_accuracy,
        longitude,
        latitude,
        course_over_ground,
        second,
        regional,
        dte,
        assigned,
        raim,
        radio_status,
    })
}

pub(super) fn encode_sar_aircraft(w: &mut BitWriter, m: &SarAircraftReport) -> Result<(), CodecError> {
    w.put_uint("altitude", m.altitude, 12)?;
    w.put_uint("speed_over_ground", m.speed_over_ground, 10)?;
    w.put_bool(m.position_accuracy);
    w.put_longitude("longitude", m.longitude, 28)?;
    w.put_latitude("latitude", m.latitude, 27)?;
    w.put_course("course_over_ground", m.course_over_ground)?;
    w.put_uint("second", m.second, 6)?;
    w.put_uint("regional", m.regional, 8)?;
    w.put_bool(m.dte);
    w.put_padding(3);
    w.put_bool(m.assigned);
    w.put_bool(m.raim);
    w.put_uint("radio_status", m.radio_status, 20)
}

// ---------------------------------------------------------------------------
// Type 18
// ---------------------------------------------------------------------------

pub(super) fn decode_class_b(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<ClassBPositionReport, CodecError> {
    let reserved = r.u8(8)?;
    let speed_over_ground = r.speed()?;
    let position_accuracy = r.bool()?;
    let longitude = r.longitude(28)?;
    let latitude = r.latitude(27)?;
    let course_over_ground = r.course()?;
    let true_heading = r.u16(9)?;
    let second = r.u8(6)?;
    let regional = r.u8(2)?;
    Ok(ClassBPositionReport {
        header,
        reserved,
        speed_over_ground,
        position_accuracy,
        longitude,
        latitude,
        course_over_ground,
        true_heading,
        second,
        regional,
        cs_unit: r.bool()?,
        display: r.bool()?,
        dsc: r.bool()?,
        band: r.bool()?,
        msg22: r.bool()?,
        assigned: r.bool()?,
        raim: r.bool()?,
        radio_status: r.u32(20)?,
    })
}

pub(super) fn encode_class_b(w: &mut BitWriter, m: &ClassBPositionReport) -> Result<(), CodecError> {
    w.put_uint("reserved", m.reserved, 8)?;
    w.put_speed("speed_over_ground", m.speed_over_ground)?;
    w.put_bool(m.position_accuracy);
    w.put_longitude("longitude", m.longitude, 28)?;
    w.put_latitude("latitude", m.latitude, 27)?;
    w.put_course("course_over_ground", m.course_over_ground)?;
    w.put_uint("true_heading", m.true_heading, 9)?;
    w.put_uint("second", m.second, 6)?;
    w.put_uint("regional", m.regional, 2)?;
    for flag in [m.cs_unit, m.display, m.dsc, m.band, m.msg22, m.assigned, m.raim] {
        w.put_bool(flag);
    }
    w.put_uint("radio_status", m.radio_status, 20)
}

// ---------------------------------------------------------------------------
// Type 19
// ---------------------------------------------------------------------------

pub(super) fn decode_extended_class_b(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<ExtendedClassBReport, CodecError> {
    let reserved = r.u8(8)?;
    let speed_over_ground = r.speed()?;
    let position_accuracy = r.bool()?;
    let longitude = r.longitude(28)?;
    let latitude = r.latitude(27)?;
    let course_over_ground = r.course()?;
    let true_heading = r.u16(9)?;
    let second = r.u8(6)?;
    let regional = r.u8(4)?;
    let vessel_name = r.string(120)?;
    let ship_type = r.u8(8)?;
    let dimensions = decode_dimensions(r)?;
    let epfd = EpfdType::from(r.u8(4)?);
    let raim = r.bool()?;
    let dte = r.bool()?;
    let assigned = r.bool()?;
    r.skip(4)?;
    Ok(ExtendedClassBReport {
        header,
        reserved,
        speed_over_ground,
        position_accuracy,
        longitude,
        latitude,
        course_over_ground,
        true_heading,
        second,
        regional,
        vessel_name,
        ship_type,
        dimensions,
        epfd,
        raim,
        dte,
        assigned,
    })
}

pub(super) fn encode_extended_class_b(
    w: &mut BitWriter,
    m: &ExtendedClassBReport,
) -> Result<(), CodecError> {
    w.put_uint("reserved", m.reserved, 8)?;
    w.put_speed("speed_over_ground", m.speed_over_ground)?;
    w.put_bool(m.position_accuracy);
    w.put_longitude("longitude", m.longitude, 28)?;
    w.put_latitude("latitude", m.latitude, 27)?;
    w.put_course("course_over_ground", m.course_over_ground)?;
    w.put_uint("true_heading", m.true_heading, 9)?;
    w.put_uint("second", m.second, 6)?;
    w.put_uint("regional", m.regional, 4)?;
    w.put_string(&m.vessel_name, 120);
    w.put_uint("ship_type", m.ship_type, 8)?;
    encode_dimensions(w, &m.dimensions)?;
    w.put_uint("epfd", m.epfd.value(), 4)?;
    w.put_bool(m.raim);
    w.put_bool(m.dte);
    w.put_bool(m.assigned);
    w.put_padding(4);
    Ok(())
}

// ---------------------------------------------------------------------------
// Type 27
// ---------------------------------------------------------------------------

pub(super) fn decode_long_range(
    r: &mut BitReader<'_>,
    header: Header,
) -> Result<LongRangeReport, CodecError> {
    let position_accuracy = r.bool()?;
    let raim = r.bool()?;
    let nav_status = NavigationStatus::from(r.u8(4)?);
    let longitude = r.longitude(18)?;
    let latitude = r.latitude(17)?;
    let speed_over_ground = r.u8(6)?;
    let course_over_ground = r.u16(9)?;
    let position_latency = r.bool()?;
    r.skip(1)?;
    Ok(LongRangeReport {
        header,
        position_accuracy,
        raim,
        nav_status,
        longitude,
        latitude,
        speed_over_ground,
        course_over_ground,
        position_latency,
    })
}

pub(super) fn encode_long_range(w: &mut BitWriter, m: &LongRangeReport) -> Result<(), CodecError> {
    w.put_bool(m.position_accuracy);
    w.put_bool(m.raim);
    w.put_uint("nav_status", m.nav_status.value(), 4)?;
    w.put_longitude("longitude", m.longitude, 18)?;
    w.put_latitude("latitude", m.latitude, 17)?;
    w.put_uint("speed_over_ground", m.speed_over_ground, 6)?;
    w.put_uint("course_over_ground", m.course_over_ground, 9)?;
    w.put_bool(m.position_latency);
    w.put_padding(1);
    Ok(())
}
