//! Link-management records: UTC inquiry (10), interrogation (15), assignment
//! mode command (16), data link management (20), channel management (22)
//! and group assignment command (23).

use serde::{Deserialize, Serialize};

use crate::message::Header;

// ---------------------------------------------------------------------------
// UtcInquiry (type 10)
// ---------------------------------------------------------------------------

/// UTC/date inquiry (type 10).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct UtcInquiry {
    /// Common header.
    pub header: Header,
    /// MMSI of the interrogated station.
    pub dest_mmsi: u32,
}

// ---------------------------------------------------------------------------
// Interrogation (type 15)
// ---------------------------------------------------------------------------

/// A requested message type and the slot offset for the reply.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SlotRequest {
    /// Requested message type (6 bits).
    pub message_type: u8,
    /// Response slot offset (12 bits).
    pub slot_offset: u16,
}

/// The optional second interrogated station of a type 15 message.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SecondInterrogation {
    /// MMSI of the second interrogated station.
    pub mmsi: u32,
    /// Message requested from it.
    pub request: SlotRequest,
}

/// Interrogation (type 15): one or two stations, up to three requests.
///
/// A `second` station always comes with `first_request_2` on the wire; when
/// encoding a record with `second` set and `first_request_2` empty, the
/// unused request slot is transmitted as zeros.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Interrogation {
    /// Common header.
    pub header: Header,
    /// MMSI of the first interrogated station.
    pub mmsi: u32,
    /// First message requested from the first station.
    pub first_request_1: SlotRequest,
    /// Second message requested from the first station.
    pub first_request_2: Option<SlotRequest>,
    /// Second interrogated station.
    pub second: Option<SecondInterrogation>,
}

// ---------------------------------------------------------------------------
// AssignmentModeCommand (type 16)
// ---------------------------------------------------------------------------

/// A reporting-rate assignment for one station.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SlotAssignment {
    /// MMSI of the assigned station.
    pub mmsi: u32,
    /// Slot offset (12 bits).
    pub offset: u16,
    /// Slot increment (10 bits).
    pub increment: u16,
}

/// Assignment mode command (type 16): one or two assignments.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct AssignmentModeCommand {
    /// Common header.
    pub header: Header,
    /// One or two assignments.
    pub assignments: Vec<SlotAssignment>,
}

// ---------------------------------------------------------------------------
// DataLinkManagement (type 20)
// ---------------------------------------------------------------------------

/// One FATDMA slot reservation block.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SlotReservation {
    /// Reserved slot offset (12 bits).
    pub offset: u16,
    /// Number of consecutive slots (4 bits).
    pub number: u8,
    /// Reservation timeout in minutes (3 bits).
    pub timeout: u8,
    /// Slot increment (11 bits).
    pub increment: u16,
}

/// Data link management message (type 20): one to four reservations.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct DataLinkManagement {
    /// Common header.
    pub header: Header,
    /// One to four slot reservations.
    pub reservations: Vec<SlotReservation>,
}

// ---------------------------------------------------------------------------
// ChannelManagement (type 22)
// ---------------------------------------------------------------------------

/// Area of applicability of a type 22 command.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChannelArea {
    /// Command addressed to up to two stations.
    Addressed {
        /// First addressed station.
        dest_mmsi_1: u32,
        /// Second addressed station (0 when unused).
        dest_mmsi_2: u32,
    },
    /// Command broadcast to a rectangular region (1/10 minute resolution).
    Region {
        /// North-east corner longitude.
        ne_longitude: f64,
        /// North-east corner latitude.
        ne_latitude: f64,
        /// South-west corner longitude.
        sw_longitude: f64,
        /// South-west corner latitude.
        sw_latitude: f64,
    },
}

impl Default for ChannelArea {
    fn default() -> Self {
        Self::Region {
            ne_longitude: 0.0,
            ne_latitude: 0.0,
            sw_longitude: 0.0,
            sw_latitude: 0.0,
        }
    }
}

/// Channel management (type 22).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ChannelManagement {
    /// Common header.
    pub header: Header,
    /// Channel A number (12 bits).
    pub channel_a: u16,
    /// Channel B number (12 bits).
    pub channel_b: u16,
    /// Transmit/receive mode (4 bits).
    pub txrx_mode: u8,
    /// `true` for low power.
    pub low_power: bool,
    /// Addressed stations or broadcast region.
    pub area: ChannelArea,
    /// Channel A bandwidth flag.
    pub band_a: bool,
    /// Channel B bandwidth flag.
    pub band_b: bool,
    /// Transitional zone size (3 bits).
    pub zone_size: u8,
}

// ---------------------------------------------------------------------------
// GroupAssignmentCommand (type 23)
// ---------------------------------------------------------------------------

/// Group assignment command (type 23).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct GroupAssignmentCommand {
    /// Common header.
    pub header: Header,
    /// North-east corner longitude (1/10 minute resolution).
    pub ne_longitude: f64,
    /// North-east corner latitude.
    pub ne_latitude: f64,
    /// South-west corner longitude.
    pub sw_longitude: f64,
    /// South-west corner latitude.
    pub sw_latitude: f64,
    /// Station type selector (4 bits).
    pub station_type: u8,
    /// Ship and cargo type selector (8 bits).
    pub ship_type: u8,
    /// Transmit/receive mode (2 bits).
    pub txrx_mode: u8,
    /// Reporting interval code (4 bits).
    pub report_interval: u8,
    /// Quiet time in minutes (4 bits).
    pub quiet_time: u8,
}
