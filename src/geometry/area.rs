//! Field area from a ring of WGS84 vertices.
//!
//! Uses the shoelace-style spherical approximation
//!
//! ```text
//! area = |Σ (lng2 - lng1) * (2 + sin(lat1) + sin(lat2))| * R² / 2
//! ```
//!
//! summed over every edge of the closed ring (including last -> first),
//! with all angles in radians and R the mean Earth radius. Accurate enough
//! for field-sized polygons (up to a few hundred hectares); not meant for
//! regions.
//!
//! The arithmetic is kept exactly as written above, evaluated in that order,
//! so that previously recorded hectare values reproduce bit for bit.

use super::GeoPoint;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Square meters per hectare
pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Area enclosed by `points` in square meters.
///
/// Returns exactly 0 for fewer than 3 points. Winding order does not
/// matter. Degenerate rings (repeated or collinear points) yield a small or
/// zero value; self-intersecting rings yield the absolute signed sum.
pub fn polygon_area_square_meters(points: &[GeoPoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut total = 0.0;
    let n = points.len();

    for i in 0..n {
        let p1 = points[i];
        let p2 = points[(i + 1) % n];

        let lat1 = p1.lat.to_radians();
        let lat2 = p2.lat.to_radians();
        let lng1 = p1.lng.to_radians();
        let lng2 = p2.lng.to_radians();

        total += (lng2 - lng1) * (2.0 + lat1.sin() + lat2.sin());
    }

    total.abs() * EARTH_RADIUS_M * EARTH_RADIUS_M / 2.0
}

/// Area enclosed by `points` in hectares.
pub fn polygon_area_hectares(points: &[GeoPoint]) -> f64 {
    polygon_area_square_meters(points) / SQUARE_METERS_PER_HECTARE
}
