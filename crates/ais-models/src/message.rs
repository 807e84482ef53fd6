//! The [`AisMessage`] sum type and the [`Header`] common to every layout.
//!
//! Each variant corresponds to exactly one 6-bit message type id. Layouts
//! that share a bit table (1/2/3, 4/11, 7/13) share a record struct but keep
//! distinct variants, so the type id is always recoverable from the variant.

use serde::{Deserialize, Serialize};

use crate::binary::{
    Acknowledge, AddressedBinary, AddressedSafety, BinaryBroadcast, DgnssBroadcast,
    MultipleSlotBinary, SafetyBroadcast, SingleSlotBinary,
};
use crate::management::{
    AssignmentModeCommand, ChannelManagement, DataLinkManagement, GroupAssignmentCommand,
    Interrogation, UtcInquiry,
};
use crate::position::{
    BaseStationReport, ClassBPositionReport, ExtendedClassBReport, LongRangeReport,
    PositionReport, SarAircraftReport,
};
use crate::voyage::{AidToNavigationReport, StaticDataReport, StaticVoyageData};

/// Largest value a 30-bit MMSI field can hold.
pub const MAX_MMSI: u32 = (1 << 30) - 1;

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// Fields shared by every AIS message after the 6-bit type id.
///
/// # Examples
///
/// ```
/// use ais_models::Header;
///
/// let header = Header::new(244_670_424);
/// assert_eq!(header.repeat_indicator, 0);
/// assert_eq!(header.mmsi, 244_670_424);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Header {
    /// Repeat indicator (2 bits): how many times the message has been repeated.
    pub repeat_indicator: u8,
    /// Maritime Mobile Service Identity of the source station (30 bits).
    pub mmsi: u32,
}

impl Header {
    /// Header for an original (not repeated) transmission.
    pub fn new(mmsi: u32) -> Self {
        Self {
            repeat_indicator: 0,
            mmsi,
        }
    }
}

// ---------------------------------------------------------------------------
// AisMessage
// ---------------------------------------------------------------------------

/// A decoded AIS message: one variant per ITU-R M.1371 message type, plus a
/// header-only fallback for type ids without a layout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum AisMessage {
    /// Type 1: scheduled class A position report.
    PositionReportScheduled(PositionReport),
    /// Type 2: assigned-schedule class A position report.
    PositionReportAssigned(PositionReport),
    /// Type 3: class A position report in response to interrogation.
    PositionReportInterrogated(PositionReport),
    /// Type 4: base station report.
    BaseStationReport(BaseStationReport),
    /// Type 5: static and voyage-related data.
    StaticVoyageData(StaticVoyageData),
    /// Type 6: addressed binary message.
    AddressedBinary(AddressedBinary),
    /// Type 7: binary acknowledge.
    BinaryAcknowledge(Acknowledge),
    /// Type 8: binary broadcast message.
    BinaryBroadcast(BinaryBroadcast),
    /// Type 9: standard SAR aircraft position report.
    SarAircraftReport(SarAircraftReport),
    /// Type 10: UTC/date inquiry.
    UtcInquiry(UtcInquiry),
    /// Type 11: UTC/date response.
    UtcDateResponse(BaseStationReport),
    /// Type 12: addressed safety-related message.
    AddressedSafety(AddressedSafety),
    /// Type 13: safety-related acknowledge.
    SafetyAcknowledge(Acknowledge),
    /// Type 14: safety-related broadcast message.
    SafetyBroadcast(SafetyBroadcast),
    /// Type 15: interrogation.
    Interrogation(Interrogation),
    /// Type 16: assignment mode command.
    AssignmentModeCommand(AssignmentModeCommand),
    /// Type 17: DGNSS broadcast binary message.
    DgnssBroadcast(DgnssBroadcast),
    /// Type 18: standard class B position report.
    ClassBPositionReport(ClassBPositionReport),
    /// Type 19: extended class B position report.
    ExtendedClassBReport(ExtendedClassBReport),
    /// Type 20: data link management.
    DataLinkManagement(DataLinkManagement),
    /// Type 21: aid-to-navigation report.
    AidToNavigationReport(AidToNavigationReport),
    /// Type 22: channel management.
    ChannelManagement(ChannelManagement),
    /// Type 23: group assignment command.
    GroupAssignmentCommand(GroupAssignmentCommand),
    /// Type 24: class B static data report (part A or B).
    StaticDataReport(StaticDataReport),
    /// Type 25: single slot binary message.
    SingleSlotBinary(SingleSlotBinary),
    /// Type 26: multiple slot binary message with communication state.
    MultipleSlotBinary(MultipleSlotBinary),
    /// Type 27: long-range AIS broadcast message.
    LongRangeReport(LongRangeReport),
    /// Any type id without a layout (0, 28–63): only the header is decoded.
    Unknown {
        /// The 6-bit type id as received.
        message_type: u8,
        /// The common header.
        header: Header,
    },
}

impl AisMessage {
    /// The 6-bit message type id this record encodes to.
    pub fn message_type(&self) -> u8 {
        match self {
            Self::PositionReportScheduled(_) => 1,
            Self::PositionReportAssigned(_) => 2,
            Self::PositionReportInterrogated(_) => 3,
            Self::BaseStationReport(_) => 4,
            Self::StaticVoyageData(_) => 5,
            Self::AddressedBinary(_) => 6,
            Self::BinaryAcknowledge(_) => 7,
            Self::BinaryBroadcast(_) => 8,
            Self::SarAircraftReport(_) => 9,
            Self::UtcInquiry(_) => 10,
            Self::UtcDateResponse(_) => 11,
            Self::AddressedSafety(_) => 12,
            Self::SafetyAcknowledge(_) => 13,
            Self::SafetyBroadcast(_) => 14,
            Self::Interrogation(_) => 15,
            Self::AssignmentModeCommand(_) => 16,
            Self::DgnssBroadcast(_) => 17,
            Self::ClassBPositionReport(_) => 18,
            Self::ExtendedClassBReport(_) => 19,
            Self::DataLinkManagement(_) => 20,
            Self::AidToNavigationReport(_) => 21,
            Self::ChannelManagement(_) => 22,
            Self::GroupAssignmentCommand(_) => 23,
            Self::StaticDataReport(_) => 24,
            Self::SingleSlotBinary(_) => 25,
            Self::MultipleSlotBinary(_) => 26,
            Self::LongRangeReport(_) => 27,
            Self::Unknown { message_type, .. } => *message_type,
        }
    }

    /// The common header (repeat indicator and MMSI).
    pub fn header(&self) -> &Header {
        match self {
            Self::PositionReportScheduled(m)
            | Self::PositionReportAssigned(m)
            | Self::PositionReportInterrogated(m) => &m.header,
            Self::BaseStationReport(m) | Self::UtcDateResponse(m) => &m.header,
            Self::StaticVoyageData(m) => &m.header,
            Self::AddressedBinary(m) => &m.header,
            Self::BinaryAcknowledge(m) | Self::SafetyAcknowledge(m) => &m.header,
            Self::BinaryBroadcast(m) => &m.header,
            Self::SarAircraftReport(m) => &m.header,
            Self::UtcInquiry(m) => &m.header,
            Self::AddressedSafety(m) => &m.header,
            Self::SafetyBroadcast(m) => &m.header,
            Self::Interrogation(m) => &m.header,
            Self::AssignmentModeCommand(m) => &m.header,
            Self::DgnssBroadcast(m) => &m.header,
            Self::ClassBPositionReport(m) => &m.header,
            Self::ExtendedClassBReport(m) => &m.header,
            Self::DataLinkManagement(m) => &m.header,
            Self::AidToNavigationReport(m) => &m.header,
            Self::ChannelManagement(m) => &m.header,
            Self::GroupAssignmentCommand(m) => &m.header,
            Self::StaticDataReport(m) => &m.header,
            Self::SingleSlotBinary(m) => &m.header,
            Self::MultipleSlotBinary(m) => &m.header,
            Self::LongRangeReport(m) => &m.header,
            Self::Unknown { header, .. } => header,
        }
    }

    /// MMSI of the source station.
    pub fn mmsi(&self) -> u32 {
        self.header().mmsi
    }

    /// `(latitude, longitude)` in degrees for layouts that carry a position.
    ///
    /// Sentinel values (91° / 181°) are returned as-is.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::PositionReportScheduled(m)
            | Self::PositionReportAssigned(m)
            | Self::PositionReportInterrogated(m) => Some((m.latitude, m.longitude)),
            Self::BaseStationReport(m) | Self::UtcDateResponse(m) => {
                Some((m.latitude, m.longitude))
            }
            Self::SarAircraftReport(m) => Some((m.latitude, m.longitude)),
            Self::DgnssBroadcast(m) => Some((m.latitude, m.longitude)),
            Self::ClassBPositionReport(m) => Some((m.latitude, m.longitude)),
            Self::ExtendedClassBReport(m) => Some((m.latitude, m.longitude)),
            Self::AidToNavigationReport(m) => Some((m.latitude, m.longitude)),
            Self::LongRangeReport(m) => Some((m.latitude, m.longitude)),
            _ => None,
        }
    }

    /// Vessel or aid-to-navigation name for layouts that carry one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::StaticVoyageData(m) => Some(&m.vessel_name),
            Self::ExtendedClassBReport(m) => Some(&m.vessel_name),
            Self::AidToNavigationReport(m) => Some(&m.name),
            Self::StaticDataReport(m) => m.name(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NavigationStatus;

    fn sample_position() -> PositionReport {
        PositionReport {
            header: Header::new(244_670_424),
            nav_status: NavigationStatus::Moored,
            latitude: 51.894_75,
            longitude: 4.382_7,
            ..PositionReport::default()
        }
    }

    #[test]
    fn shared_layouts_keep_their_type_id() {
        let report = sample_position();
        assert_eq!(AisMessage::PositionReportScheduled(report.clone()).message_type(), 1);
        assert_eq!(AisMessage::PositionReportAssigned(report.clone()).message_type(), 2);
        assert_eq!(AisMessage::PositionReportInterrogated(report).message_type(), 3);
    }

    #[test]
    fn unknown_carries_raw_type() {
        let msg = AisMessage::Unknown {
            message_type: 42,
            header: Header::new(MAX_MMSI),
        };
        assert_eq!(msg.message_type(), 42);
        assert_eq!(msg.mmsi(), MAX_MMSI);
        assert!(msg.position().is_none());
    }

    #[test]
    fn position_accessor() {
        let msg = AisMessage::PositionReportScheduled(sample_position());
        assert_eq!(msg.position(), Some((51.894_75, 4.382_7)));
        assert_eq!(msg.mmsi(), 244_670_424);
    }

    #[test]
    fn serde_roundtrip_is_adjacently_tagged() {
        let msg = AisMessage::PositionReportScheduled(sample_position());
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "PositionReportScheduled");
        assert_eq!(json["data"]["header"]["mmsi"], 244_670_424);
        let back: AisMessage = serde_json::from_value(json).unwrap();
        assert_eq!(msg, back);
    }
}
