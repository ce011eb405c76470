use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;
use crate::geometry::{GeoPoint, polygon_area_hectares};

/// Field boundary as stored in a record
///
/// Serialized as a plain array of `[lat, lng]` pairs. When reading, objects
/// of the form `{"lat": .., "lng": ..}` are accepted too.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polygon {
    points: Vec<GeoPoint>,
}

impl Polygon {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// Parse a stored polygon field. `null` is an empty polygon.
    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: Option<Polygon> = serde_json::from_str(json)?;
        Ok(parsed.unwrap_or_default())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the polygon encloses anything (at least 3 vertices)
    pub fn has_boundary(&self) -> bool {
        self.points.len() >= 3
    }

    pub fn area_hectares(&self) -> f64 {
        polygon_area_hectares(&self.points)
    }
}

impl From<Vec<GeoPoint>> for Polygon {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self::new(points)
    }
}

/// Vertices of an optional stored boundary.
///
/// An absent field and a list of fewer than 3 entries both mean "no
/// boundary" and yield an empty slice.
pub fn boundary_points(polygon: Option<&Polygon>) -> &[GeoPoint] {
    match polygon {
        Some(p) if p.has_boundary() => p.points(),
        _ => &[],
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPoint {
    Pair([f64; 2]),
    Object {
        lat: f64,
        #[serde(alias = "lon")]
        lng: f64,
    },
}

impl Serialize for Polygon {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.points.iter().map(|p| [p.lat, p.lng]))
    }
}

impl<'de> Deserialize<'de> for Polygon {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Vec::<StoredPoint>::deserialize(deserializer)?;
        let points = raw
            .into_iter()
            .map(|p| {
                let (lat, lng) = match p {
                    StoredPoint::Pair([lat, lng]) => (lat, lng),
                    StoredPoint::Object { lat, lng } => (lat, lng),
                };
                GeoPoint::try_new(lat, lng).map_err(serde::de::Error::custom)
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { points })
    }
}
