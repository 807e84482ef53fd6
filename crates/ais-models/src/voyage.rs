//! Static and voyage-related records: class A static data (type 5), class B
//! static data (type 24) and aid-to-navigation reports (type 21).
//!
//! Text fields hold the decoded 6-bit characters with trailing `@` padding
//! and spaces removed.

use serde::{Deserialize, Serialize};

use crate::message::Header;
use crate::navigation::{Dimensions, EpfdType, Eta};

// ---------------------------------------------------------------------------
// StaticVoyageData (type 5)
// ---------------------------------------------------------------------------

/// Class A static and voyage-related data (type 5).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct StaticVoyageData {
    /// Common header.
    pub header: Header,
    /// AIS version indicator (0 = ITU-R M.1371-1).
    pub ais_version: u8,
    /// IMO ship identification number.
    pub imo: u32,
    /// Radio call sign, up to 7 characters.
    pub callsign: String,
    /// Vessel name, up to 20 characters.
    pub vessel_name: String,
    /// Ship and cargo type code.
    pub ship_type: u8,
    /// Hull dimensions relative to the reference point.
    pub dimensions: Dimensions,
    /// Position-fixing device type.
    pub epfd: EpfdType,
    /// Estimated time of arrival.
    pub eta: Eta,
    /// Maximum present static draught in metres (0.1 m resolution).
    pub draught: f64,
    /// Destination, up to 20 characters.
    pub destination: String,
    /// Data terminal equipment ready flag (`false` = ready).
    pub dte: bool,
}

// ---------------------------------------------------------------------------
// StaticDataReport (type 24)
// ---------------------------------------------------------------------------

/// Returns `true` when an MMSI designates an auxiliary craft (`98XXXYYYY`),
/// whose type 24 part B carries the mothership MMSI instead of dimensions.
///
/// # Examples
///
/// ```
/// use ais_models::is_auxiliary_craft;
///
/// assert!(is_auxiliary_craft(983_191_049));
/// assert!(!is_auxiliary_craft(271_041_815));
/// ```
pub fn is_auxiliary_craft(mmsi: u32) -> bool {
    mmsi / 10_000_000 == 98
}

/// Class B static data report (type 24), transmitted as two independent parts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StaticDataReport {
    /// Common header.
    pub header: Header,
    /// Part A (name) or part B (type, vendor, call sign, dimensions).
    pub part: StaticDataPart,
}

impl StaticDataReport {
    /// The vessel name, when this is a part A report.
    pub fn name(&self) -> Option<&str> {
        match &self.part {
            StaticDataPart::A { vessel_name } => Some(vessel_name),
            StaticDataPart::B { .. } => None,
        }
    }

    /// The 2-bit part number (0 = A, 1 = B).
    pub fn part_number(&self) -> u8 {
        match self.part {
            StaticDataPart::A { .. } => 0,
            StaticDataPart::B { .. } => 1,
        }
    }
}

/// The two halves of a type 24 report.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "part")]
pub enum StaticDataPart {
    /// Part A: vessel name.
    A {
        /// Vessel name, up to 20 characters.
        vessel_name: String,
    },
    /// Part B: vessel type, equipment identification and call sign.
    B {
        /// Ship and cargo type code.
        ship_type: u8,
        /// Manufacturer id, up to 3 characters.
        vendor_id: String,
        /// Unit model code (4 bits).
        model: u8,
        /// Unit serial number (20 bits).
        serial: u32,
        /// Radio call sign, up to 7 characters.
        callsign: String,
        /// Hull dimensions, or the mothership MMSI for auxiliary craft.
        reference: ShipReference,
    },
}

/// The last 30 bits of a type 24 part B report.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ShipReference {
    /// Hull dimensions relative to the reference point.
    Dimensions(Dimensions),
    /// MMSI of the mothership (auxiliary craft only).
    Mothership(u32),
}

// ---------------------------------------------------------------------------
// AidToNavigationReport (type 21)
// ---------------------------------------------------------------------------

/// Aid-to-navigation report (type 21).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AidToNavigationReport {
    /// Common header.
    pub header: Header,
    /// Aid type code (5 bits, 0 = not specified).
    pub aid_type: u8,
    /// Name of the aid, up to 20 characters.
    pub name: String,
    /// `true` for high accuracy.
    pub position_accuracy: bool,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Dimensions of the aid relative to the reference point.
    pub dimensions: Dimensions,
    /// Position-fixing device type.
    pub epfd: EpfdType,
    /// UTC second of the position fix.
    pub second: u8,
    /// Floating aid is off its charted position.
    pub off_position: bool,
    /// Regional reserved bits (8).
    pub regional: u8,
    /// RAIM flag.
    pub raim: bool,
    /// Virtual (not physically present) aid.
    pub virtual_aid: bool,
    /// Assigned-mode flag.
    pub assigned: bool,
    /// Name extension beyond 20 characters, up to 14 more.
    pub name_extension: String,
}

impl AidToNavigationReport {
    /// The name with its extension appended.
    pub fn full_name(&self) -> String {
        format!("{}{}", self.name, self.name_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_numbers() {
        let a = StaticDataReport {
            header: Header::new(271_041_815),
            part: StaticDataPart::A {
                vessel_name: "PROGUY".into(),
            },
        };
        assert_eq!(a.part_number(), 0);
        assert_eq!(a.name(), Some("PROGUY"));

        let b = StaticDataReport {
            header: Header::new(271_041_815),
            part: StaticDataPart::B {
                ship_type: 60,
                vendor_id: "1D0".into(),
                model: 0,
                serial: 0,
                callsign: "TC6163".into(),
                reference: ShipReference::Dimensions(Dimensions {
                    to_bow: 0,
                    to_stern: 15,
                    to_port: 0,
                    to_starboard: 5,
                }),
            },
        };
        assert_eq!(b.part_number(), 1);
        assert!(b.name().is_none());
    }

    #[test]
    fn static_data_serde_roundtrip() {
        let report = StaticDataReport {
            header: Header::new(983_191_049),
            part: StaticDataPart::B {
                ship_type: 37,
                vendor_id: "SRT".into(),
                model: 2,
                serial: 12_345,
                callsign: String::new(),
                reference: ShipReference::Mothership(211_234_567),
            },
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"part\":\"B\""));
        let back: StaticDataReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }

    #[test]
    fn aton_full_name() {
        let aton = AidToNavigationReport {
            name: "NORTH SEA WIND FARM ".trim_end().into(),
            name_extension: " NO 4".into(),
            ..AidToNavigationReport::default()
        };
        assert_eq!(aton.full_name(), "NORTH SEA WIND FARM NO 4");
    }
}
