use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FieldError;
pub use crate::geometry::area::SQUARE_METERS_PER_HECTARE;

pub const SQUARE_METERS_PER_ACRE: f64 = 4_046.856_422_4;

/// Unit a surface area is recorded in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AreaUnit {
    #[serde(rename = "m2")]
    SquareMeters,
    #[default]
    #[serde(rename = "ha")]
    Hectares,
    #[serde(rename = "ac")]
    Acres,
}

impl AreaUnit {
    fn square_meters_per_unit(self) -> f64 {
        match self {
            AreaUnit::SquareMeters => 1.0,
            AreaUnit::Hectares => SQUARE_METERS_PER_HECTARE,
            AreaUnit::Acres => SQUARE_METERS_PER_ACRE,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            AreaUnit::SquareMeters => "m2",
            AreaUnit::Hectares => "ha",
            AreaUnit::Acres => "ac",
        }
    }
}

impl FromStr for AreaUnit {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m2" | "m²" | "sqm" => Ok(AreaUnit::SquareMeters),
            "ha" | "hectare" | "hectares" => Ok(AreaUnit::Hectares),
            "ac" | "acre" | "acres" => Ok(AreaUnit::Acres),
            _ => Err(FieldError::UnknownUnit(s.to_string())),
        }
    }
}

impl fmt::Display for AreaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A surface area tagged with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceArea {
    pub value: f64,
    pub unit: AreaUnit,
}

impl SurfaceArea {
    pub fn new(value: f64, unit: AreaUnit) -> Self {
        Self { value, unit }
    }

    pub fn hectares(value: f64) -> Self {
        Self::new(value, AreaUnit::Hectares)
    }

    pub fn to_square_meters(self) -> f64 {
        self.value * self.unit.square_meters_per_unit()
    }

    /// Express the same surface in another unit
    pub fn convert_to(self, unit: AreaUnit) -> Self {
        if unit == self.unit {
            return self;
        }
        Self::new(self.to_square_meters() / unit.square_meters_per_unit(), unit)
    }
}

impl fmt::Display for SurfaceArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            AreaUnit::SquareMeters => write!(f, "{:.0} {}", self.value, self.unit),
            _ => write!(f, "{:.4} {}", self.value, self.unit),
        }
    }
}
