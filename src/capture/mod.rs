pub mod controller;
pub mod script;

pub use controller::{CaptureMode, CaptureObserver, CaptureSnapshot, CaptureState, PolygonCapture};
pub use script::{CaptureAction, parse_script};
