use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Polygon, SurfaceArea};
use crate::error::{FieldError, Result};
use crate::geometry::GeoPoint;

/// Which kind of record owns a boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    #[default]
    Location,
    Plot,
}

impl FromStr for RecordKind {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "location" | "field" => Ok(RecordKind::Location),
            "plot" => Ok(RecordKind::Plot),
            _ => Err(FieldError::UnknownKind(s.to_string())),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Location => f.write_str("location"),
            RecordKind::Plot => f.write_str("plot"),
        }
    }
}

/// Draft of a Location or Plot record being edited
///
/// Owns its boundary exclusively. The surface may be recorded in any unit;
/// a captured boundary with a positive area replaces it with hectares.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    pub kind: RecordKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polygon: Option<Polygon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<SurfaceArea>,
}

impl FieldRecord {
    pub fn new(kind: RecordKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Store a capture emission in the draft.
    ///
    /// The points are kept verbatim. The surface is overwritten with the
    /// hectare value only when the area is greater than zero.
    pub fn apply_capture(&mut self, points: &[GeoPoint], area_hectares: f64) {
        self.polygon = Some(Polygon::new(points.to_vec()));
        if area_hectares > 0.0 {
            self.surface = Some(SurfaceArea::hectares(area_hectares));
        }
    }

    /// Saved boundary, or an empty slice when none is defined
    pub fn boundary(&self) -> &[GeoPoint] {
        super::polygon::boundary_points(self.polygon.as_ref())
    }

    /// JSON payload sent to the remote store on save
    pub fn to_payload(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_payload(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
