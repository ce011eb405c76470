use serde::{Deserialize, Serialize};

use crate::error::{FieldError, Result};

/// A WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Create a point from external input, rejecting out-of-range or
    /// non-finite values.
    pub fn try_new(lat: f64, lng: f64) -> Result<Self> {
        let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
        let lng_ok = lng.is_finite() && (-180.0..=180.0).contains(&lng);
        if lat_ok && lng_ok {
            Ok(Self { lat, lng })
        } else {
            Err(FieldError::InvalidCoordinate { lat, lng })
        }
    }

    /// Geo coordinate with longitude as x and latitude as y
    pub fn to_coord(self) -> geo::Coord<f64> {
        geo::coord! { x: self.lng, y: self.lat }
    }

    pub fn from_coord(coord: geo::Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

impl From<(f64, f64)> for GeoPoint {
    /// Builds a point from a `(lat, lng)` pair.
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lat_dir = if self.lat >= 0.0 { "N" } else { "S" };
        let lng_dir = if self.lng >= 0.0 { "E" } else { "W" };
        write!(
            f,
            "{:.6}{} / {:.6}{}",
            self.lat.abs(),
            lat_dir,
            self.lng.abs(),
            lng_dir
        )
    }
}
