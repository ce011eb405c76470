use log::{debug, trace};
use std::fmt;

use crate::geometry::{GeoPoint, polygon_area_hectares, vertex_centroid};

/// Callback receiving the full point list and its area in hectares after
/// every mutation
pub type CaptureObserver = Box<dyn FnMut(&[GeoPoint], f64)>;

/// Whether the surface accepts input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureMode {
    #[default]
    Editable,
    ReadOnly,
}

/// Coarse state of the point list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Empty,
    /// `usable` is true once there are enough points to enclose an area
    HasPoints { usable: bool },
}

/// Points and area as reported to the consumer
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureSnapshot {
    pub points: Vec<GeoPoint>,
    pub area_hectares: f64,
}

/// Interactive boundary capture for one editing session
///
/// The point list is only changed through [`add_point`](Self::add_point)
/// and [`clear`](Self::clear). Each successful mutation recomputes the area
/// once and notifies the observer once. A read-only capture displays a
/// fixed list and never notifies.
pub struct PolygonCapture {
    points: Vec<GeoPoint>,
    mode: CaptureMode,
    center: Option<GeoPoint>,
    observer: Option<CaptureObserver>,
}

impl PolygonCapture {
    /// Empty, editable capture
    pub fn new() -> Self {
        Self::with_points(Vec::new())
    }

    /// Editable capture seeded with a previously saved boundary.
    /// Seeding does not notify.
    pub fn with_points(points: Vec<GeoPoint>) -> Self {
        Self {
            points,
            mode: CaptureMode::Editable,
            center: None,
            observer: None,
        }
    }

    /// Display-only capture of a fixed boundary
    pub fn read_only(points: Vec<GeoPoint>) -> Self {
        Self {
            mode: CaptureMode::ReadOnly,
            ..Self::with_points(points)
        }
    }

    /// Initial viewport center
    pub fn with_center(mut self, center: GeoPoint) -> Self {
        self.center = Some(center);
        self
    }

    pub fn with_observer(mut self, observer: impl FnMut(&[GeoPoint], f64) + 'static) -> Self {
        self.set_observer(observer);
        self
    }

    pub fn set_observer(&mut self, observer: impl FnMut(&[GeoPoint], f64) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn is_read_only(&self) -> bool {
        self.mode == CaptureMode::ReadOnly
    }

    /// Append a vertex. Returns false, changing nothing, in read-only mode.
    pub fn add_point(&mut self, point: GeoPoint) -> bool {
        if self.is_read_only() {
            trace!("Ignoring point {} on read-only capture", point);
            return false;
        }

        self.points.push(point);
        debug!("Added point {} ({} total)", point, self.points.len());
        self.notify();
        true
    }

    /// Remove every vertex. Returns false, changing nothing, in read-only
    /// mode.
    pub fn clear(&mut self) -> bool {
        if self.is_read_only() {
            trace!("Ignoring clear on read-only capture");
            return false;
        }

        self.points.clear();
        debug!("Cleared capture");
        self.notify();
        true
    }

    /// Move the viewport. Presentation only: the points are untouched and
    /// nothing is notified.
    pub fn recenter(&mut self, center: GeoPoint) {
        trace!("Recentered viewport on {}", center);
        self.center = Some(center);
    }

    /// Viewport center: the explicit one if set, else the middle of the
    /// current vertices
    pub fn center(&self) -> Option<GeoPoint> {
        self.center.or_else(|| vertex_centroid(&self.points))
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

    /// Advisory: fewer than 3 points cannot enclose an area yet
    pub fn is_usable(&self) -> bool {
        self.points.len() >= 3
    }

    pub fn state(&self) -> CaptureState {
        if self.points.is_empty() {
            CaptureState::Empty
        } else {
            CaptureState::HasPoints {
                usable: self.is_usable(),
            }
        }
    }

    pub fn area_hectares(&self) -> f64 {
        polygon_area_hectares(&self.points)
    }

    pub fn snapshot(&self) -> CaptureSnapshot {
        CaptureSnapshot {
            points: self.points.clone(),
            area_hectares: self.area_hectares(),
        }
    }

    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    fn notify(&mut self) {
        let area = polygon_area_hectares(&self.points);
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.points, area);
        }
    }
}

impl Default for PolygonCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PolygonCapture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolygonCapture")
            .field("points", &self.points)
            .field("mode", &self.mode)
            .field("center", &self.center)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Emissions = Rc<RefCell<Vec<CaptureSnapshot>>>;

    fn recording_capture(capture: PolygonCapture) -> (PolygonCapture, Emissions) {
        let emissions: Emissions = Rc::default();
        let sink = Rc::clone(&emissions);
        let capture = capture.with_observer(move |points, area| {
            sink.borrow_mut().push(CaptureSnapshot {
                points: points.to_vec(),
                area_hectares: area,
            });
        });
        (capture, emissions)
    }

    fn five_points() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(44.4940, 11.3420),
            GeoPoint::new(44.4952, 11.3451),
            GeoPoint::new(44.4938, 11.3477),
            GeoPoint::new(44.4921, 11.3460),
            GeoPoint::new(44.4925, 11.3431),
        ]
    }

    #[test]
    fn test_new_capture_is_empty() {
        let capture = PolygonCapture::new();
        assert!(capture.is_empty());
        assert_eq!(capture.state(), CaptureState::Empty);
        assert_eq!(capture.area_hectares(), 0.0);
        assert!(capture.center().is_none());
    }

    #[test]
    fn test_add_point_appends_and_emits_once() {
        let (mut capture, emissions) = recording_capture(PolygonCapture::new());

        assert!(capture.add_point(GeoPoint::new(1.0, 2.0)));
        assert_eq!(capture.len(), 1);
        assert_eq!(emissions.borrow().len(), 1);

        assert!(capture.add_point(GeoPoint::new(1.0, 2.001)));
        assert_eq!(capture.len(), 2);
        assert_eq!(emissions.borrow().len(), 2);

        let last = emissions.borrow().last().cloned().unwrap();
        assert_eq!(last.points, capture.points());
        assert_eq!(last.area_hectares, 0.0);
    }

    #[test]
    fn test_build_triangle() {
        let (mut capture, emissions) = recording_capture(PolygonCapture::new());

        capture.add_point(GeoPoint::new(0.0, 0.0));
        capture.add_point(GeoPoint::new(0.0, 0.001));
        assert_eq!(capture.state(), CaptureState::HasPoints { usable: false });
        capture.add_point(GeoPoint::new(0.001, 0.0));

        assert_eq!(capture.len(), 3);
        assert_eq!(capture.state(), CaptureState::HasPoints { usable: true });

        let area = emissions.borrow().last().unwrap().area_hectares;
        assert!(area > 0.0);

        let mut reversed = capture.points().to_vec();
        reversed.reverse();
        assert_eq!(area, polygon_area_hectares(&reversed));
    }

    #[test]
    fn test_identical_points_have_zero_area() {
        let (mut capture, emissions) = recording_capture(PolygonCapture::new());
        for _ in 0..3 {
            capture.add_point(GeoPoint::new(10.0, 10.0));
        }

        assert_eq!(capture.len(), 3);
        assert_eq!(emissions.borrow().last().unwrap().area_hectares, 0.0);
    }

    #[test]
    fn test_clear_after_populate() {
        let (mut capture, emissions) = recording_capture(PolygonCapture::new());
        for p in five_points() {
            capture.add_point(p);
        }
        assert!(capture.area_hectares() > 0.0);

        assert!(capture.clear());
        assert_eq!(capture.len(), 0);
        assert_eq!(capture.state(), CaptureState::Empty);

        let emissions = emissions.borrow();
        assert_eq!(emissions.len(), 6);
        let last = emissions.last().unwrap();
        assert!(last.points.is_empty());
        assert_eq!(last.area_hectares, 0.0);
    }

    #[test]
    fn test_clear_empty_still_emits() {
        let (mut capture, emissions) = recording_capture(PolygonCapture::new());
        assert!(capture.clear());
        assert_eq!(emissions.borrow().len(), 1);
        assert_eq!(emissions.borrow()[0].area_hectares, 0.0);

        assert!(capture.add_point(GeoPoint::new(0.0, 0.0)));
        assert_eq!(capture.len(), 1);
    }

    #[test]
    fn test_no_dedup_of_repeated_points() {
        let mut capture = PolygonCapture::new();
        capture.add_point(GeoPoint::new(5.0, 5.0));
        capture.add_point(GeoPoint::new(5.0, 5.0));
        assert_eq!(capture.len(), 2);
    }

    #[test]
    fn test_seeded_capture_does_not_emit_until_changed() {
        let (mut capture, emissions) = recording_capture(PolygonCapture::with_points(five_points()));
        assert!(emissions.borrow().is_empty());
        assert_eq!(capture.len(), 5);

        capture.add_point(GeoPoint::new(44.4930, 11.3415));
        assert_eq!(emissions.borrow().len(), 1);
        assert_eq!(emissions.borrow()[0].points.len(), 6);
    }

    #[test]
    fn test_read_only_rejects_input_and_never_emits() {
        let (mut capture, emissions) = recording_capture(PolygonCapture::read_only(five_points()));

        assert!(capture.is_read_only());
        assert!(!capture.add_point(GeoPoint::new(0.0, 0.0)));
        assert!(!capture.clear());
        assert_eq!(capture.len(), 5);
        assert!(capture.area_hectares() > 0.0);
        assert!(emissions.borrow().is_empty());
    }

    #[test]
    fn test_recenter_does_not_touch_points() {
        let (mut capture, emissions) = recording_capture(PolygonCapture::with_points(five_points()));
        let before = capture.snapshot();

        capture.recenter(GeoPoint::new(45.0, 12.0));

        assert_eq!(capture.center(), Some(GeoPoint::new(45.0, 12.0)));
        assert_eq!(capture.snapshot(), before);
        assert!(emissions.borrow().is_empty());
    }

    #[test]
    fn test_center_defaults_to_vertex_centroid() {
        let capture = PolygonCapture::with_points(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 2.0),
            GeoPoint::new(2.0, 2.0),
            GeoPoint::new(2.0, 0.0),
        ]);
        let center = capture.center().unwrap();
        assert!((center.lat - 1.0).abs() < 1e-12);
        assert!((center.lng - 1.0).abs() < 1e-12);

        let explicit = PolygonCapture::new().with_center(GeoPoint::new(3.0, 4.0));
        assert_eq!(explicit.center(), Some(GeoPoint::new(3.0, 4.0)));
    }

    #[test]
    fn test_snapshot_matches_emission() {
        let (mut capture, emissions) = recording_capture(PolygonCapture::new());
        for p in five_points() {
            capture.add_point(p);
        }
        assert_eq!(emissions.borrow().last().cloned().unwrap(), capture.snapshot());
        assert_eq!(capture.into_points(), five_points());
    }
}
