//! Flat JSON / CSV rendering of decoded messages for downstream consumers.
//!
//! The canonical serde form of [`AisMessage`] is nested and lossless; the
//! report form here is a single flat object per message, in a fixed field
//! order:
//!
//! ```text
//! type, repeatIndicator, mmsi, timestamp, <type-specific fields...>
//! ```
//!
//! Coordinates are rounded to 6 decimal places, speeds and courses to 1.
//! Fields a layout may omit (the second station of an interrogation, the
//! destination of a broadcast binary message, ...) are always present and
//! render as JSON `null` / an empty CSV cell, so every record of a given
//! type shares one CSV header.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::binary::{ApplicationId, BinaryPayload};
use crate::management::ChannelArea;
use crate::message::{AisMessage, Header};
use crate::navigation::Dimensions;
use crate::voyage::{ShipReference, StaticDataPart, StaticDataReport};

// ---------------------------------------------------------------------------
// FieldValue
// ---------------------------------------------------------------------------

/// One rendered report value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Unsigned integer field.
    UInt(u64),
    /// Boolean flag.
    Bool(bool),
    /// Latitude or longitude, rendered with 6 decimal places.
    Coordinate(f64),
    /// Speed, course, rate of turn or draught, rendered with 1 decimal place.
    Decimal(f64),
    /// Free text (names, call signs, destinations); quoted in CSV.
    Text(String),
    /// Enumeration rendered by name.
    Label(String),
    /// Opaque binary payload as base64.
    Binary(String),
    /// Field not carried by this particular record.
    Empty,
}

fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::UInt(v) => serializer.serialize_u64(*v),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Coordinate(v) => serializer.serialize_f64(round_to(*v, 6)),
            Self::Decimal(v) => serializer.serialize_f64(round_to(*v, 1)),
            Self::Text(v) | Self::Label(v) | Self::Binary(v) => serializer.serialize_str(v),
            Self::Empty => serializer.serialize_none(),
        }
    }
}

impl fmt::Display for FieldValue {
    /// CSV cell text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UInt(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Coordinate(v) => write!(f, "{v:.6}"),
            Self::Decimal(v) => write!(f, "{v:.1}"),
            Self::Text(v) => write!(f, "\"{}\"", v.replace('"', "\"\"")),
            Self::Label(v) | Self::Binary(v) => f.write_str(v),
            Self::Empty => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Field list builder
// ---------------------------------------------------------------------------

/// Ordered `(name, value)` pairs of one report.
pub type FieldList = Vec<(&'static str, FieldValue)>;

#[derive(Default)]
struct Fields(FieldList);

impl Fields {
    fn push(mut self, name: &'static str, value: FieldValue) -> Self {
        self.0.push((name, value));
        self
    }

    fn uint(self, name: &'static str, value: impl Into<u64>) -> Self {
        self.push(name, FieldValue::UInt(value.into()))
    }

    fn opt_uint<T: Into<u64>>(self, name: &'static str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.uint(name, v),
            None => self.push(name, FieldValue::Empty),
        }
    }

    fn flag(self, name: &'static str, value: bool) -> Self {
        self.push(name, FieldValue::Bool(value))
    }

    fn coord(self, name: &'static str, value: f64) -> Self {
        self.push(name, FieldValue::Coordinate(value))
    }

    fn opt_coord(self, name: &'static str, value: Option<f64>) -> Self {
        match value {
            Some(v) => self.coord(name, v),
            None => self.push(name, FieldValue::Empty),
        }
    }

    fn decimal(self, name: &'static str, value: f64) -> Self {
        self.push(name, FieldValue::Decimal(value))
    }

    fn text(self, name: &'static str, value: &str) -> Self {
        self.push(name, FieldValue::Text(value.to_string()))
    }

    fn label(self, name: &'static str, value: impl fmt::Display) -> Self {
        self.push(name, FieldValue::Label(value.to_string()))
    }

    fn position(self, longitude: f64, latitude: f64) -> Self {
        self.coord("longitude", longitude).coord("latitude", latitude)
    }

    fn dimensions(self, d: Option<Dimensions>) -> Self {
        self.opt_uint("toBow", d.map(|d| d.to_bow))
            .opt_uint("toStern", d.map(|d| d.to_stern))
            .opt_uint("toPort", d.map(|d| d.to_port))
            .opt_uint("toStarboard", d.map(|d| d.to_starboard))
    }

    fn application(self, id: Option<ApplicationId>) -> Self {
        self.opt_uint("dac", id.map(|a| a.dac))
            .opt_uint("fid", id.map(|a| a.fid))
    }

    fn payload(self, data: &BinaryPayload) -> Self {
        self.uint("dataBits", data.bit_len() as u64)
            .push("data", FieldValue::Binary(data.to_base64()))
    }

    fn finish(self) -> FieldList {
        self.0
    }
}

const ACK_NAMES: [(&str, &str); 4] = [
    ("mmsi1", "sequenceNumber1"),
    ("mmsi2", "sequenceNumber2"),
    ("mmsi3", "sequenceNumber3"),
    ("mmsi4", "sequenceNumber4"),
];

const ASSIGNMENT_NAMES: [(&str, &str, &str); 2] = [
    ("mmsi1", "offset1", "increment1"),
    ("mmsi2", "offset2", "increment2"),
];

const RESERVATION_NAMES: [(&str, &str, &str, &str); 4] = [
    ("offset1", "number1", "timeout1", "increment1"),
    ("offset2", "number2", "timeout2", "increment2"),
    ("offset3", "number3", "timeout3", "increment3"),
    ("offset4", "number4", "timeout4", "increment4"),
];

// ---------------------------------------------------------------------------
// AisMessage rendering
// ---------------------------------------------------------------------------

impl AisMessage {
    /// Type-specific report fields in output order (header fields and the
    /// timestamp excluded).
    #[allow(clippy::too_many_lines)]
    pub fn fields(&self) -> FieldList {
        let f = Fields::default();
        match self {
            Self::PositionReportScheduled(m)
            | Self::PositionReportAssigned(m)
            | Self::PositionReportInterrogated(m) => f
                .label("navStatus", m.nav_status)
                .decimal("rateOfTurn", m.rate_of_turn)
                .decimal("speedOverGround", m.speed_over_ground)
                .flag("positionAccuracy", m.position_accuracy)
                .position(m.longitude, m.latitude)
                .decimal("courseOverGround", m.course_over_ground)
                .uint("trueHeading", m.true_heading)
                .uint("second", m.second)
                .label("maneuver", m.maneuver)
                .flag("raim", m.raim)
                .uint("radioStatus", m.radio_status),
            Self::BaseStationReport(m) | Self::UtcDateResponse(m) => f
                .uint("year", m.year)
                .uint("month", m.month)
                .uint("day", m.day)
                .uint("hour", m.hour)
                .uint("minute", m.minute)
                .uint("second", m.second)
                .flag("positionAccuracy", m.position_accuracy)
                .position(m.longitude, m.latitude)
                .label("epfd", m.epfd)
                .flag("raim", m.raim)
                .uint("radioStatus", m.radio_status),
            Self::StaticVoyageData(m) => f
                .uint("aisVersion", m.ais_version)
                .uint("imo", m.imo)
                .text("callsign", &m.callsign)
                .text("vesselName", &m.vessel_name)
                .uint("shipType", m.ship_type)
                .dimensions(Some(m.dimensions))
                .label("epfd", m.epfd)
                .uint("etaMonth", m.eta.month)
                .uint("etaDay", m.eta.day)
                .uint("etaHour", m.eta.hour)
                .uint("etaMinute", m.eta.minute)
                .decimal("draught", m.draught)
                .text("destination", &m.destination)
                .flag("dte", m.dte),
            Self::AddressedBinary(m) => f
                .uint("sequenceNumber", m.sequence_number)
                .uint("destMmsi", m.dest_mmsi)
                .flag("retransmit", m.retransmit)
                .application(Some(m.application_id))
                .payload(&m.data),
            Self::BinaryAcknowledge(m) | Self::SafetyAcknowledge(m) => {
                ACK_NAMES.iter().enumerate().fold(f, |f, (i, &(mmsi, seq))| {
                    let ack = m.acknowledgements.get(i);
                    f.opt_uint(mmsi, ack.map(|a| a.mmsi))
                        .opt_uint(seq, ack.map(|a| a.sequence_number))
                })
            }
            Self::BinaryBroadcast(m) => f.application(Some(m.application_id)).payload(&m.data),
            Self::SarAircraftReport(m) => f
                .uint("altitude", m.altitude)
                .uint("speedOverGround", m.speed_over_ground)
                .flag("positionAccuracy", m.position_accuracy)
                .position(m.longitude, m.latitude)
                .decimal("courseOverGround", m.course_over_ground)
                .uint("second", m.second)
                .uint("regional", m.regional)
                .flag("dte", m.dte)
                .flag("assigned", m.assigned)
                .flag("raim", m.raim)
                .uint("radioStatus", m.radio_status),
            Self::UtcInquiry(m) => f.uint("destMmsi", m.dest_mmsi),
            Self::AddressedSafety(m) => f
                .uint("sequenceNumber", m.sequence_number)
                .uint("destMmsi", m.dest_mmsi)
                .flag("retransmit", m.retransmit)
                .text("text", &m.text),
            Self::SafetyBroadcast(m) => f.text("text", &m.text),
            Self::Interrogation(m) => f
                .uint("mmsi1", m.mmsi)
                .uint("messageType1_1", m.first_request_1.message_type)
                .uint("slotOffset1_1", m.first_request_1.slot_offset)
                .opt_uint("messageType1_2", m.first_request_2.map(|r| r.message_type))
                .opt_uint("slotOffset1_2", m.first_request_2.map(|r| r.slot_offset))
                .opt_uint("mmsi2", m.second.map(|s| s.mmsi))
                .opt_uint("messageType2_1", m.second.map(|s| s.request.message_type))
                .opt_uint("slotOffset2_1", m.second.map(|s| s.request.slot_offset)),
            Self::AssignmentModeCommand(m) => ASSIGNMENT_NAMES.iter().enumerate().fold(
                f,
                |f, (i, &(mmsi, offset, increment))| {
                    let a = m.assignments.get(i);
                    f.opt_uint(mmsi, a.map(|a| a.mmsi))
                        .opt_uint(offset, a.map(|a| a.offset))
                        .opt_uint(increment, a.map(|a| a.increment))
                },
            ),
            Self::DgnssBroadcast(m) => f.position(m.longitude, m.latitude).payload(&m.data),
            Self::ClassBPositionReport(m) => f
                .uint("reserved", m.reserved)
                .decimal("speedOverGround", m.speed_over_ground)
                .flag("positionAccuracy", m.position_accuracy)
                .position(m.longitude, m.latitude)
                .decimal("courseOverGround", m.course_over_ground)
                .uint("trueHeading", m.true_heading)
                .uint("second", m.second)
                .uint("regional", m.regional)
                .flag("csUnit", m.cs_unit)
                .flag("display", m.display)
                .flag("dsc", m.dsc)
                .flag("band", m.band)
                .flag("msg22", m.msg22)
                .flag("assigned", m.assigned)
                .flag("raim", m.raim)
                .uint("radioStatus", m.radio_status),
            Self::ExtendedClassBReport(m) => f
                .uint("reserved", m.reserved)
                .decimal("speedOverGround", m.speed_over_ground)
                .flag("positionAccuracy", m.position_accuracy)
                .position(m.longitude, m.latitude)
                .decimal("courseOverGround", m.course_over_ground)
                .uint("trueHeading", m.true_heading)
                .uint("second", m.second)
                .uint("regional", m.regional)
                .text("vesselName", &m.vessel_name)
                .uint("shipType", m.ship_type)
                .dimensions(Some(m.dimensions))
                .label("epfd", m.epfd)
                .flag("raim", m.raim)
                .flag("dte", m.dte)
                .flag("assigned", m.assigned),
            Self::DataLinkManagement(m) => RESERVATION_NAMES.iter().enumerate().fold(
                f,
                |f, (i, &(offset, number, timeout, increment))| {
                    let r = m.reservations.get(i);
                    f.opt_uint(offset, r.map(|r| r.offset))
                        .opt_uint(number, r.map(|r| r.number))
                        .opt_uint(timeout, r.map(|r| r.timeout))
                        .opt_uint(increment, r.map(|r| r.increment))
                },
            ),
            Self::AidToNavigationReport(m) => f
                .uint("aidType", m.aid_type)
                .text("name", &m.full_name())
                .flag("positionAccuracy", m.position_accuracy)
                .position(m.longitude, m.latitude)
                .dimensions(Some(m.dimensions))
                .label("epfd", m.epfd)
                .uint("second", m.second)
                .flag("offPosition", m.off_position)
                .uint("regional", m.regional)
                .flag("raim", m.raim)
                .flag("virtualAid", m.virtual_aid)
                .flag("assigned", m.assigned),
            Self::ChannelManagement(m) => {
                let (dest, region) = match m.area {
                    ChannelArea::Addressed {
                        dest_mmsi_1,
                        dest_mmsi_2,
                    } => (Some((dest_mmsi_1, dest_mmsi_2)), None),
                    ChannelArea::Region {
                        ne_longitude,
                        ne_latitude,
                        sw_longitude,
                        sw_latitude,
                    } => (
                        None,
                        Some((ne_longitude, ne_latitude, sw_longitude, sw_latitude)),
                    ),
                };
                f.uint("channelA", m.channel_a)
                    .uint("channelB", m.channel_b)
                    .uint("txrxMode", m.txrx_mode)
                    .flag("lowPower", m.low_power)
                    .flag("addressed", dest.is_some())
                    .opt_uint("destMmsi1", dest.map(|d| d.0))
                    .opt_uint("destMmsi2", dest.map(|d| d.1))
                    .opt_coord("neLongitude", region.map(|r| r.0))
                    .opt_coord("neLatitude", region.map(|r| r.1))
                    .opt_coord("swLongitude", region.map(|r| r.2))
                    .opt_coord("swLatitude", region.map(|r| r.3))
                    .flag("bandA", m.band_a)
                    .flag("bandB", m.band_b)
                    .uint("zoneSize", m.zone_size)
            }
            Self::GroupAssignmentCommand(m) => f
                .coord("neLongitude", m.ne_longitude)
                .coord("neLatitude", m.ne_latitude)
                .coord("swLongitude", m.sw_longitude)
                .coord("swLatitude", m.sw_latitude)
                .uint("stationType", m.station_type)
                .uint("shipType", m.ship_type)
                .uint("txrxMode", m.txrx_mode)
                .uint("reportInterval", m.report_interval)
                .uint("quietTime", m.quiet_time),
            Self::StaticDataReport(m) => static_data_fields(f, m),
            Self::SingleSlotBinary(m) => f
                .flag("addressed", m.dest_mmsi.is_some())
                .flag("structured", m.application_id.is_some())
                .opt_uint("destMmsi", m.dest_mmsi)
                .application(m.application_id)
                .payload(&m.data),
            Self::MultipleSlotBinary(m) => f
                .flag("addressed", m.dest_mmsi.is_some())
                .flag("structured", m.application_id.is_some())
                .opt_uint("destMmsi", m.dest_mmsi)
                .application(m.application_id)
                .payload(&m.data)
                .uint("radioStatus", m.radio_status),
            Self::LongRangeReport(m) => f
                .flag("positionAccuracy", m.position_accuracy)
                .flag("raim", m.raim)
                .label("navStatus", m.nav_status)
                .position(m.longitude, m.latitude)
                .uint("speedOverGround", m.speed_over_ground)
                .uint("courseOverGround", m.course_over_ground)
                .flag("positionLatency", m.position_latency),
            Self::Unknown { .. } => f,
        }
        .finish()
    }

    /// Borrowing view that serialises as the flat report object.
    pub fn report(&self, timestamp: DateTime<Utc>) -> Report<'_> {
        Report {
            message: self,
            timestamp,
        }
    }

    /// The flat report as one line of JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use ais_models::{AisMessage, Header, UtcInquiry};
    /// use chrono::{TimeZone, Utc};
    ///
    /// let msg = AisMessage::UtcInquiry(UtcInquiry {
    ///     header: Header::new(366_814_480),
    ///     dest_mmsi: 366_832_740,
    /// });
    /// let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    /// assert_eq!(
    ///     msg.to_json_line(ts).unwrap(),
    ///     r#"{"type":10,"repeatIndicator":0,"mmsi":366814480,"timestamp":"2024-05-01T12:00:00Z","destMmsi":366832740}"#,
    /// );
    /// ```
    pub fn to_json_line(&self, timestamp: DateTime<Utc>) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.report(timestamp))
    }

    /// The flat report as one CSV line (no trailing newline), matching
    /// [`csv_header`] for this message type.
    pub fn to_csv_line(&self, timestamp: DateTime<Utc>) -> String {
        let header = self.header();
        let mut cells = vec![
            self.message_type().to_string(),
            header.repeat_indicator.to_string(),
            header.mmsi.to_string(),
            format_timestamp(timestamp),
        ];
        cells.extend(self.fields().into_iter().map(|(_, v)| v.to_string()));
        cells.join(",")
    }
}

fn static_data_fields(f: Fields, m: &StaticDataReport) -> Fields {
    let f = f.uint("partNumber", m.part_number());
    match &m.part {
        StaticDataPart::A { vessel_name } => f
            .text("vesselName", vessel_name)
            .push("shipType", FieldValue::Empty)
            .push("vendorId", FieldValue::Empty)
            .push("model", FieldValue::Empty)
            .push("serial", FieldValue::Empty)
            .push("callsign", FieldValue::Empty)
            .dimensions(None)
            .push("mothershipMmsi", FieldValue::Empty),
        StaticDataPart::B {
            ship_type,
            vendor_id,
            model,
            serial,
            callsign,
            reference,
        } => {
            let (dims, mothership) = match *reference {
                ShipReference::Dimensions(d) => (Some(d), None),
                ShipReference::Mothership(mmsi) => (None, Some(mmsi)),
            };
            f.push("vesselName", FieldValue::Empty)
                .uint("shipType", *ship_type)
                .text("vendorId", vendor_id)
                .uint("model", *model)
                .uint("serial", *serial)
                .text("callsign", callsign)
                .dimensions(dims)
                .opt_uint("mothershipMmsi", mothership)
        }
    }
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// A message paired with its receive time; serialises as the flat report.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    message: &'a AisMessage,
    timestamp: DateTime<Utc>,
}

impl Serialize for Report<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.message.fields();
        let header = self.message.header();
        let mut map = serializer.serialize_map(Some(fields.len() + 4))?;
        map.serialize_entry("type", &self.message.message_type())?;
        map.serialize_entry("repeatIndicator", &header.repeat_indicator)?;
        map.serialize_entry("mmsi", &header.mmsi)?;
        map.serialize_entry("timestamp", &format_timestamp(self.timestamp))?;
        for (name, value) in &fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// CSV header line for reports of the given message type.
///
/// Layouts with optional parts list every column they can carry, so all
/// records of one type share the same header.
///
/// # Examples
///
/// ```
/// assert_eq!(
///     ais_models::csv_header(10),
///     "type,repeatIndicator,mmsi,timestamp,destMmsi",
/// );
/// ```
pub fn csv_header(message_type: u8) -> String {
    let mut columns = vec!["type", "repeatIndicator", "mmsi", "timestamp"];
    columns.extend(template(message_type).fields().into_iter().map(|(n, _)| n));
    columns.join(",")
}

/// A default record of the given type, used only for its field names.
fn template(message_type: u8) -> AisMessage {
    let header = Header::default();
    match message_type {
        1 => AisMessage::PositionReportScheduled(Default::default()),
        2 => AisMessage::PositionReportAssigned(Default::default()),
        3 => AisMessage::PositionReportInterrogated(Default::default()),
        4 => AisMessage::BaseStationReport(Default::default()),
        5 => AisMessage::StaticVoyageData(Default::default()),
        6 => AisMessage::AddressedBinary(Default::default()),
        7 => AisMessage::BinaryAcknowledge(Default::default()),
        8 => AisMessage::BinaryBroadcast(Default::default()),
        9 => AisMessage::SarAircraftReport(Default::default()),
        10 => AisMessage::UtcInquiry(Default::default()),
        11 => AisMessage::UtcDateResponse(Default::default()),
        12 => AisMessage::AddressedSafety(Default::default()),
        13 => AisMessage::SafetyAcknowledge(Default::default()),
        14 => AisMessage::SafetyBroadcast(Default::default()),
        15 => AisMessage::Interrogation(Default::default()),
        16 => AisMessage::AssignmentModeCommand(Default::default()),
        17 => AisMessage::DgnssBroadcast(Default::default()),
        18 => AisMessage::ClassBPositionReport(Default::default()),
        19 => AisMessage::ExtendedClassBReport(Default::default()),
        20 => AisMessage::DataLinkManagement(Default::default()),
        21 => AisMessage::AidToNavigationReport(Default::default()),
        22 => AisMessage::ChannelManagement(Default::default()),
        23 => AisMessage::GroupAssignmentCommand(Default::default()),
        24 => AisMessage::StaticDataReport(StaticDataReport {
            header,
            part: StaticDataPart::A {
                vessel_name: String::new(),
            },
        }),
        25 => AisMessage::SingleSlotBinary(Default::default()),
        26 => AisMessage::MultipleSlotBinary(Default::default()),
        27 => AisMessage::LongRangeReport(Default::default()),
        other => AisMessage::Unknown {
            message_type: other,
            header,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::Acknowledgement;
    use crate::navigation::{EpfdType, Eta, ManeuverIndicator, NavigationStatus};
    use crate::position::PositionReport;
    use crate::voyage::StaticVoyageData;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 17, 45, 2).unwrap()
    }

    fn position() -> AisMessage {
        AisMessage::PositionReportScheduled(PositionReport {
            header: Header::new(244_670_424),
            nav_status: NavigationStatus::NotDefined,
            rate_of_turn: -128.0,
            speed_over_ground: 0.0,
            position_accuracy: true,
            longitude: 4.382_698_333_333_333,
            latitude: 51.894_75,
            course_over_ground: 70.6,
            true_heading: 511,
            second: 14,
            maneuver: ManeuverIndicator::NotAvailable,
            raim: true,
            radio_status: 33_359,
        })
    }

    #[test]
    fn json_line_starts_with_header_fields() {
        let line = position().to_json_line(ts()).unwrap();
        assert!(line.starts_with(
            r#"{"type":1,"repeatIndicator":0,"mmsi":244670424,"timestamp":"2024-03-09T17:45:02Z","navStatus":"not_defined""#
        ));
    }

    #[test]
    fn json_line_rounds_coordinates_and_speeds() {
        let value: serde_json::Value =
            serde_json::from_str(&position().to_json_line(ts()).unwrap()).unwrap();
        assert_eq!(value["longitude"], 4.382_698);
        assert_eq!(value["latitude"], 51.894_75);
        assert_eq!(value["courseOverGround"], 70.6);
        assert_eq!(value["rateOfTurn"], -128.0);
        assert_eq!(value["maneuver"], "not_available");
    }

    #[test]
    fn csv_line_matches_header() {
        let msg = position();
        let header = csv_header(1);
        let line = msg.to_csv_line(ts());
        assert_eq!(header.split(',').count(), line.split(',').count());
        assert!(line.contains(",4.382698,51.894750,"));
        assert!(line.starts_with("1,0,244670424,2024-03-09T17:45:02Z,not_defined,-128.0,0.0,"));
    }

    #[test]
    fn csv_quotes_free_text() {
        let msg = AisMessage::StaticVoyageData(StaticVoyageData {
            header: Header::new(351_759_000),
            imo: 9_134_270,
            callsign: "3FOF8".into(),
            vessel_name: "EVER \"DIADEM\"".into(),
            ship_type: 70,
            epfd: EpfdType::Gps,
            eta: Eta {
                month: 5,
                day: 15,
                hour: 14,
                minute: 0,
            },
            draught: 12.2,
            destination: "NEW YORK, NY".into(),
            ..StaticVoyageData::default()
        });
        let line = msg.to_csv_line(ts());
        assert!(line.contains(r#","3FOF8","EVER ""DIADEM""",70,"#));
        assert!(line.contains(r#",12.2,"NEW YORK, NY",false"#));
    }

    #[test]
    fn missing_optional_fields_render_empty() {
        let msg = AisMessage::BinaryAcknowledge(crate::binary::Acknowledge {
            header: Header::new(2_655_651),
            acknowledgements: vec![Acknowledgement {
                mmsi: 265_538_450,
                sequence_number: 0,
            }],
        });
        assert!(msg.to_csv_line(ts()).ends_with(",265538450,0,,,,,,"));
        let value: serde_json::Value =
            serde_json::from_str(&msg.to_json_line(ts()).unwrap()).unwrap();
        assert!(value["mmsi2"].is_null());
    }

    #[test]
    fn every_type_has_stable_header() {
        for message_type in 0u8..64 {
            let header = csv_header(message_type);
            let line = template(message_type).to_csv_line(ts());
            assert_eq!(header.split(',').count(), line.split(',').count());
            assert_eq!(template(message_type).message_type(), message_type);
        }
    }

    #[test]
    fn static_data_parts_share_columns() {
        let part_b = AisMessage::StaticDataReport(StaticDataReport {
            header: Header::new(983_191_049),
            part: StaticDataPart::B {
                ship_type: 37,
                vendor_id: "SRT".into(),
                model: 2,
                serial: 12_345,
                callsign: String::new(),
                reference: ShipReference::Mothership(211_234_567),
            },
        });
        let names: Vec<_> = part_b.fields().into_iter().map(|(n, _)| n).collect();
        let template_names: Vec<_> = template(24).fields().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, template_names);
    }

    #[test]
    fn field_value_display() {
        assert_eq!(FieldValue::Coordinate(-0.5).to_string(), "-0.500000");
        assert_eq!(FieldValue::Decimal(102.2).to_string(), "102.2");
        assert_eq!(FieldValue::Text("A\"B".into()).to_string(), "\"A\"\"B\"");
        assert_eq!(FieldValue::Empty.to_string(), "");
    }
}
