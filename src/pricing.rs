// Room pricing table and the derived price estimate
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Room categories offered by the form. The raw field value is free text
// until it parses into one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomCategory {
    Single,
    Double,
    Suite,
}

impl RoomCategory {
    // Fixed nightly rate per category, currency-unit-agnostic integers.
    pub fn unit_price(&self) -> u64 {
        match self {
            RoomCategory::Single => 2000,
            RoomCategory::Double => 3500,
            RoomCategory::Suite => 6000,
        }
    }

    // Parse the raw form value; anything but a known category is None.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl FromStr for RoomCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Single" => Ok(RoomCategory::Single),
            "Double" => Ok(RoomCategory::Double),
            "Suite" => Ok(RoomCategory::Suite),
            _ => Err(()),
        }
    }
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoomCategory::Single => "Single",
            RoomCategory::Double => "Double",
            RoomCategory::Suite => "Suite",
        };
        f.write_str(name)
    }
}

// Price estimate for a stay. An unset or unrecognized category degrades to
// 0 rather than failing; callers validate the category separately before
// trusting a nonzero estimate.
pub fn estimate(room: Option<RoomCategory>, nights: u32) -> u64 {
    room.map_or(0, |category| category.unit_price()) * u64::from(nights)
}
