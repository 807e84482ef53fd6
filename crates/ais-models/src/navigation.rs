//! Navigation-related enumerations and small value types shared by several
//! message layouts.
//!
//! Every enum here covers its full raw bit range (reserved codes included),
//! so converting a raw field value to the enum and back is lossless.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// NavigationStatus
// ---------------------------------------------------------------------------

/// Navigational status reported by class A stations (4-bit field).
///
/// # Examples
///
/// ```
/// use ais_models::NavigationStatus;
///
/// let status = NavigationStatus::from(5);
/// assert_eq!(status, NavigationStatus::Moored);
/// assert_eq!(status.to_string(), "moored");
/// assert_eq!(status.value(), 5);
/// ```
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum NavigationStatus {
    /// Under way using engine.
    UnderWayUsingEngine = 0,
    /// At anchor.
    AtAnchor = 1,
    /// Not under command.
    NotUnderCommand = 2,
    /// Restricted manoeuvrability.
    RestrictedManoeuvrability = 3,
    /// Constrained by her draught.
    ConstrainedByDraught = 4,
    /// Moored.
    Moored = 5,
    /// Aground.
    Aground = 6,
    /// Engaged in fishing.
    EngagedInFishing = 7,
    /// Under way sailing.
    UnderWaySailing = 8,
    /// Reserved for high-speed craft.
    ReservedHsc = 9,
    /// Reserved for wing-in-ground craft.
    ReservedWig = 10,
    /// Power-driven vessel towing astern.
    TowingAstern = 11,
    /// Power-driven vessel pushing ahead or towing alongside.
    PushingAhead = 12,
    /// Reserved for future use.
    Reserved13 = 13,
    /// AIS-SART, MOB-AIS or EPIRB-AIS active.
    AisSartActive = 14,
    /// Not defined (default).
    #[default]
    NotDefined = 15,
}

impl NavigationStatus {
    /// Raw 4-bit field value.
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl From<u8> for NavigationStatus {
    fn from(raw: u8) -> Self {
        match raw & 0x0F {
            0 => Self::UnderWayUsingEngine,
            1 => Self::AtAnchor,
            2 => Self::NotUnderCommand,
            3 => Self::RestrictedManoeuvrability,
            4 => Self::ConstrainedByDraught,
            5 => Self::Moored,
            6 => Self::Aground,
            7 => Self::EngagedInFishing,
            8 => Self::UnderWaySailing,
            9 => Self::ReservedHsc,
            10 => Self::ReservedWig,
            11 => Self::TowingAstern,
            12 => Self::PushingAhead,
            13 => Self::Reserved13,
            14 => Self::AisSartActive,
            _ => Self::NotDefined,
        }
    }
}

// ---------------------------------------------------------------------------
// EpfdType
// ---------------------------------------------------------------------------

/// Type of electronic position-fixing device (4-bit field).
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum EpfdType {
    /// Undefined (default).
    #[default]
    Undefined = 0,
    /// GPS.
    Gps = 1,
    /// GLONASS.
    Glonass = 2,
    /// Combined GPS/GLONASS.
    GpsGlonass = 3,
    /// Loran-C.
    LoranC = 4,
    /// Chayka.
    Chayka = 5,
    /// Integrated navigation system.
    IntegratedNavigation = 6,
    /// Surveyed position.
    Surveyed = 7,
    /// Galileo.
    Galileo = 8,
    /// Reserved.
    Reserved9 = 9,
    /// Reserved.
    Reserved10 = 10,
    /// Reserved.
    Reserved11 = 11,
    /// Reserved.
    Reserved12 = 12,
    /// Reserved.
    Reserved13 = 13,
    /// Reserved.
    Reserved14 = 14,
    /// Internal GNSS.
    InternalGnss = 15,
}

impl EpfdType {
    /// Raw 4-bit field value.
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl From<u8> for EpfdType {
    fn from(raw: u8) -> Self {
        match raw & 0x0F {
            1 => Self::Gps,
            2 => Self::Glonass,
            3 => Self::GpsGlonass,
            4 => Self::LoranC,
            5 => Self::Chayka,
            6 => Self::IntegratedNavigation,
            7 => Self::Surveyed,
            8 => Self::Galileo,
            9 => Self::Reserved9,
            10 => Self::Reserved10,
            11 => Self::Reserved11,
            12 => Self::Reserved12,
            13 => Self::Reserved13,
            14 => Self::Reserved14,
            15 => Self::InternalGnss,
            _ => Self::Undefined,
        }
    }
}

// ---------------------------------------------------------------------------
// ManeuverIndicator
// ---------------------------------------------------------------------------

/// Special manoeuvre indicator carried by class A position reports (2 bits).
#[derive(
    Serialize,
    Deserialize,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum ManeuverIndicator {
    /// Not available (default).
    #[default]
    NotAvailable = 0,
    /// No special manoeuvre.
    NoSpecialManeuver = 1,
    /// Special manoeuvre (e.g. regional passing arrangement).
    SpecialManeuver = 2,
    /// Reserved.
    Reserved = 3,
}

impl ManeuverIndicator {
    /// Raw 2-bit field value.
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl From<u8> for ManeuverIndicator {
    fn from(raw: u8) -> Self {
        match raw & 0x03 {
            1 => Self::NoSpecialManeuver,
            2 => Self::SpecialManeuver,
            3 => Self::Reserved,
            _ => Self::NotAvailable,
        }
    }
}

// ---------------------------------------------------------------------------
// Dimensions
// ---------------------------------------------------------------------------

/// Reference-point distances to the hull extremities, in metres.
///
/// `to_bow`/`to_stern` are 9-bit fields, `to_port`/`to_starboard` 6-bit.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimensions {
    /// Distance from the reference point to the bow.
    pub to_bow: u16,
    /// Distance from the reference point to the stern.
    pub to_stern: u16,
    /// Distance from the reference point to port.
    pub to_port: u8,
    /// Distance from the reference point to starboard.
    pub to_starboard: u8,
}

impl Dimensions {
    /// Overall length (bow + stern), in metres.
    pub fn length(&self) -> u16 {
        self.to_bow + self.to_stern
    }

    /// Overall beam (port + starboard), in metres.
    pub fn beam(&self) -> u16 {
        u16::from(self.to_port) + u16::from(self.to_starboard)
    }
}

// ---------------------------------------------------------------------------
// Eta
// ---------------------------------------------------------------------------

/// Estimated time of arrival as transmitted (UTC, no year).
///
/// Zero month/day and hour 24 / minute 60 are the "not available" codes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Eta {
    /// Month, 1–12 (0 = not available).
    pub month: u8,
    /// Day, 1–31 (0 = not available).
    pub day: u8,
    /// Hour, 0–23 (24 = not available).
    pub hour: u8,
    /// Minute, 0–59 (60 = not available).
    pub minute: u8,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn navigation_status_covers_every_raw_value() {
        for raw in 0u8..16 {
            assert_eq!(NavigationStatus::from(raw).value(), raw);
        }
        assert_eq!(NavigationStatus::iter().count(), 16);
    }

    #[test]
    fn epfd_covers_every_raw_value() {
        for raw in 0u8..16 {
            assert_eq!(EpfdType::from(raw).value(), raw);
        }
    }

    #[test]
    fn maneuver_masks_to_two_bits() {
        assert_eq!(ManeuverIndicator::from(6), ManeuverIndicator::SpecialManeuver);
        for m in ManeuverIndicator::iter() {
            assert_eq!(ManeuverIndicator::from(m.value()), m);
        }
    }

    #[test]
    fn status_text_roundtrip() {
        for status in NavigationStatus::iter() {
            let text = status.to_string();
            assert_eq!(text.parse::<NavigationStatus>().unwrap(), status);
        }
        assert_eq!(NavigationStatus::EngagedInFishing.to_string(), "engaged_in_fishing");
    }

    #[test]
    fn dimensions_totals() {
        let d = Dimensions {
            to_bow: 225,
            to_stern: 70,
            to_port: 1,
            to_starboard: 31,
        };
        assert_eq!(d.length(), 295);
        assert_eq!(d.beam(), 32);
    }

    #[test]
    fn epfd_serde_is_snake_case() {
        let json = serde_json::to_string(&EpfdType::GpsGlonass).unwrap();
        assert_eq!(json, "\"gps_glonass\"");
    }
}
