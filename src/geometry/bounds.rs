use geo::{BoundingRect, Centroid, MultiPoint, Point};

use super::{GeoPoint, Projector};

/// Bounding box of a vertex list in degrees
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from a set of points
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let rect = to_multi_point(points).bounding_rect()?;

        Some(Self {
            min_lat: rect.min().y,
            max_lat: rect.max().y,
            min_lng: rect.min().x,
            max_lng: rect.max().x,
        })
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// East-west and north-south extent in meters, measured through the
    /// center of the box
    pub fn extent_meters(&self) -> (f64, f64) {
        let projector = Projector::new(self.center());
        let (min_x, min_y) = projector.project(GeoPoint::new(self.min_lat, self.min_lng));
        let (max_x, max_y) = projector.project(GeoPoint::new(self.max_lat, self.max_lng));
        (max_x - min_x, max_y - min_y)
    }
}

/// Centroid of the vertices themselves (not of the enclosed surface), used
/// to place the viewport over a saved boundary.
pub fn vertex_centroid(points: &[GeoPoint]) -> Option<GeoPoint> {
    to_multi_point(points)
        .centroid()
        .map(|c| GeoPoint::from_coord(c.0))
}

fn to_multi_point(points: &[GeoPoint]) -> MultiPoint<f64> {
    points.iter().map(|p| Point::from(p.to_coord())).collect()
}
