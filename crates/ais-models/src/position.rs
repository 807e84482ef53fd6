//! Position-carrying report records.
//!
//! Coordinates are decimal degrees (east/north positive); `181.0` longitude
//! and `91.0` latitude mean "not available". Speeds are knots, courses are
//! degrees true; see the constants below for the other reserved codes.

use serde::{Deserialize, Serialize};

use crate::message::Header;
use crate::navigation::{Dimensions, EpfdType, ManeuverIndicator, NavigationStatus};

/// Longitude value meaning "not available".
pub const LONGITUDE_NOT_AVAILABLE: f64 = 181.0;
/// Latitude value meaning "not available".
pub const LATITUDE_NOT_AVAILABLE: f64 = 91.0;
/// Speed value reported for "102.2 knots or higher".
pub const SPEED_MAX: f64 = 102.2;
/// True heading value meaning "not available".
pub const HEADING_NOT_AVAILABLE: u16 = 511;
/// Rate-of-turn value meaning "no turn information available".
pub const ROT_NOT_AVAILABLE: f64 = -128.0;
/// Rate-of-turn value meaning "turning right at more than 5°/30 s, no indicator".
pub const ROT_SATURATED_RIGHT: f64 = 127.0;
/// Rate-of-turn value meaning "turning left at more than 5°/30 s, no indicator".
pub const ROT_SATURATED_LEFT: f64 = -127.0;

// ---------------------------------------------------------------------------
// PositionReport (types 1, 2, 3)
// ---------------------------------------------------------------------------

/// Class A position report (message types 1, 2 and 3).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PositionReport {
    /// Common header.
    pub header: Header,
    /// Navigational status.
    pub nav_status: NavigationStatus,
    /// Rate of turn in degrees per minute, or one of the `ROT_*` sentinels.
    pub rate_of_turn: f64,
    /// Speed over ground in knots (0.1 kn resolution).
    pub speed_over_ground: f64,
    /// `true` for high accuracy (< 10 m, DGNSS).
    pub position_accuracy: bool,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Course over ground in degrees (0.1° resolution).
    pub course_over_ground: f64,
    /// True heading in degrees, 511 when not available.
    pub true_heading: u16,
    /// UTC second of the position fix (60+ are status codes).
    pub second: u8,
    /// Special manoeuvre indicator.
    pub maneuver: ManeuverIndicator,
    /// RAIM flag.
    pub raim: bool,
    /// 19-bit SOTDMA/ITDMA communication state.
    pub radio_status: u32,
}

// ---------------------------------------------------------------------------
// BaseStationReport (types 4, 11)
// ---------------------------------------------------------------------------

/// Base station report (type 4) or UTC/date response (type 11).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct BaseStationReport {
    /// Common header.
    pub header: Header,
    /// UTC year, 1–9999 (0 = not available).
    pub year: u16,
    /// UTC month, 1–12 (0 = not available).
    pub month: u8,
    /// UTC day, 1–31 (0 = not available).
    pub day: u8,
    /// UTC hour, 0–23 (24 = not available).
    pub hour: u8,
    /// UTC minute, 0–59 (60 = not available).
    pub minute: u8,
    /// UTC second, 0–59 (60 = not available).
    pub second: u8,
    /// `true` for high accuracy.
    pub position_accuracy: bool,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Position-fixing device type.
    pub epfd: EpfdType,
    /// RAIM flag.
    pub raim: bool,
    /// 19-bit SOTDMA communication state.
    pub radio_status: u32,
}

// ---------------------------------------------------------------------------
// SarAircraftReport (type 9)
// ---------------------------------------------------------------------------

/// Standard search-and-rescue aircraft position report (type 9).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SarAircraftReport {
    /// Common header.
    pub header: Header,
    /// Altitude in metres (4095 = not available, 4094 = 4094 m or higher).
    pub altitude: u16,
    /// Speed over ground in whole knots (1023 = not available, 1022 = 1022+).
    pub speed_over_ground: u16,
    /// `true` for high accuracy.
    pub position_accuracy: bool,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Course over ground in degrees (0.1° resolution).
    pub course_over_ground: f64,
    /// UTC second of the position fix.
    pub second: u8,
    /// Regional reserved bits.
    pub regional: u8,
    /// Data terminal equipment ready flag (`false` = ready).
    pub dte: bool,
    /// Assigned-mode flag.
    pub assigned: bool,
    /// RAIM flag.
    pub raim: bool,
    /// 20-bit communication state (selector flag + 19-bit state).
    pub radio_status: u32,
}

// ---------------------------------------------------------------------------
// ClassBPositionReport (type 18)
// ---------------------------------------------------------------------------

/// Standard class B equipment position report (type 18).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ClassBPositionReport {
    /// Common header.
    pub header: Header,
    /// Regional reserved bits (8).
    pub reserved: u8,
    /// Speed over ground in knots (0.1 kn resolution).
    pub speed_over_ground: f64,
    /// `true` for high accuracy.
    pub position_accuracy: bool,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Course over ground in degrees (0.1° resolution).
    pub course_over_ground: f64,
    /// True heading in degrees, 511 when not available.
    pub true_heading: u16,
    /// UTC second of the position fix.
    pub second: u8,
    /// Regional reserved bits (2).
    pub regional: u8,
    /// `true` for a carrier-sense (CS) unit, `false` for SOTDMA.
    pub cs_unit: bool,
    /// Unit has an integrated display.
    pub display: bool,
    /// Unit is attached to a VHF voice radio with DSC.
    pub dsc: bool,
    /// Unit can use the whole marine band.
    pub band: bool,
    /// Unit accepts channel management via message 22.
    pub msg22: bool,
    /// Assigned-mode flag.
    pub assigned: bool,
    /// RAIM flag.
    pub raim: bool,
    /// 20-bit communication state.
    pub radio_status: u32,
}

// ---------------------------------------------------------------------------
// ExtendedClassBReport (type 19)
// ---------------------------------------------------------------------------

/// Extended class B equipment position report (type 19).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ExtendedClassBReport {
    /// Common header.
    pub header: Header,
    /// Regional reserved bits (8).
    pub reserved: u8,
    /// Speed over ground in knots (0.1 kn resolution).
    pub speed_over_ground: f64,
    /// `true` for high accuracy.
    pub position_accuracy: bool,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Course over ground in degrees (0.1° resolution).
    pub course_over_ground: f64,
    /// True heading in degrees, 511 when not available.
    pub true_heading: u16,
    /// UTC second of the position fix.
    pub second: u8,
    /// Regional reserved bits (4).
    pub regional: u8,
    /// Vessel name, up to 20 characters.
    pub vessel_name: String,
    /// Ship and cargo type code.
    pub ship_type: u8,
    /// Hull dimensions relative to the reference point.
    pub dimensions: Dimensions,
    /// Position-fixing device type.
    pub epfd: EpfdType,
    /// RAIM flag.
    pub raim: bool,
    /// Data terminal equipment ready flag.
    pub dte: bool,
    /// Assigned-mode flag.
    pub assigned: bool,
}

// ---------------------------------------------------------------------------
// LongRangeReport (type 27)
// ---------------------------------------------------------------------------

/// Long-range AIS broadcast position report (type 27).
///
/// Coordinates have 1/10 minute resolution; speed and course are whole
/// knots/degrees (63 and 511 mean "not available").
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct LongRangeReport {
    /// Common header.
    pub header: Header,
    /// `true` for high accuracy.
    pub position_accuracy: bool,
    /// RAIM flag.
    pub raim: bool,
    /// Navigational status.
    pub nav_status: NavigationStatus,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Speed over ground in whole knots.
    pub speed_over_ground: u8,
    /// Course over ground in whole degrees.
    pub course_over_ground: u16,
    /// `true` when the position is not the current GNSS fix.
    pub position_latency: bool,
}
