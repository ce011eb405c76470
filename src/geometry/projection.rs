use super::GeoPoint;
use super::area::EARTH_RADIUS_M;

/// Equirectangular projection from WGS84 to local meters
///
/// Uses the approximation:
/// - x = (lng - center_lng) * cos(center_lat) * meters_per_degree
/// - y = (lat - center_lat) * meters_per_degree
///
/// on the same sphere as the area calculation. Good enough for measuring
/// the extent of a field; never used for the area itself.
#[derive(Debug, Clone)]
pub struct Projector {
    center: GeoPoint,
    cos_lat: f64,
}

impl Projector {
    /// Meters per degree of arc on the model sphere
    pub const METERS_PER_DEGREE: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

    /// Create a new projector centered at the given point
    pub fn new(center: GeoPoint) -> Self {
        Self {
            center,
            cos_lat: center.lat.to_radians().cos(),
        }
    }

    /// Project a point to local meters
    ///
    /// # Returns
    /// * (x, y) in meters, east and north of the projection center
    pub fn project(&self, point: GeoPoint) -> (f64, f64) {
        let x = (point.lng - self.center.lng) * self.cos_lat * Self::METERS_PER_DEGREE;
        let y = (point.lat - self.center.lat) * Self::METERS_PER_DEGREE;

        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projector_center() {
        let proj = Projector::new(GeoPoint::new(44.4949, 11.3426));
        let (x, y) = proj.project(GeoPoint::new(44.4949, 11.3426));
        assert!(x.abs() < 0.01);
        assert!(y.abs() < 0.01);
    }

    #[test]
    fn test_projector_1km_north() {
        let proj = Projector::new(GeoPoint::new(44.4949, 11.3426));

        // 0.009 degrees of latitude ≈ 1 km
        let (_, y) = proj.project(GeoPoint::new(44.4949 + 0.009, 11.3426));
        assert!((y - 1000.0).abs() < 10.0);
    }

    #[test]
    fn test_projector_shrinks_longitude_with_latitude() {
        let proj = Projector::new(GeoPoint::new(60.0, 0.0));
        let (x, _) = proj.project(GeoPoint::new(60.0, 1.0));
        assert!((x - Projector::METERS_PER_DEGREE * 0.5).abs() < 1.0);
    }
}
