//! Replayable capture sessions
//!
//! A session script is plain text with one action per line:
//!
//! ```text
//! # north field
//! center 44.4949 11.3426
//! add 44.4940 11.3420
//! add 44.4952 11.3451
//! clear
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. Coordinates are
//! `LAT LNG` in degrees, optionally separated by a comma.

use super::PolygonCapture;
use crate::error::{FieldError, Result};
use crate::geometry::GeoPoint;

/// A single user action on the capture surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptureAction {
    Add(GeoPoint),
    Clear,
    Center(GeoPoint),
}

impl CaptureAction {
    /// Apply the action. Returns whether the point list changed.
    pub fn apply(self, capture: &mut PolygonCapture) -> bool {
        match self {
            CaptureAction::Add(point) => capture.add_point(point),
            CaptureAction::Clear => capture.clear(),
            CaptureAction::Center(center) => {
                capture.recenter(center);
                false
            }
        }
    }
}

pub fn parse_script(input: &str) -> Result<Vec<CaptureAction>> {
    let mut actions = Vec::new();

    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_no = index + 1;
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        let action = match verb.to_ascii_lowercase().as_str() {
            "add" => CaptureAction::Add(parse_point(rest, line_no)?),
            "center" => CaptureAction::Center(parse_point(rest, line_no)?),
            "clear" => {
                if !rest.trim().is_empty() {
                    return Err(script_error(line_no, "clear takes no arguments"));
                }
                CaptureAction::Clear
            }
            other => return Err(script_error(line_no, format!("unknown action `{other}`"))),
        };
        actions.push(action);
    }

    Ok(actions)
}

fn parse_point(args: &str, line: usize) -> Result<GeoPoint> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();

    let [lat, lng] = parts.as_slice() else {
        return Err(script_error(line, "expected `LAT LNG`"));
    };

    let lat: f64 = lat
        .parse()
        .map_err(|_| script_error(line, format!("invalid latitude `{lat}`")))?;
    let lng: f64 = lng
        .parse()
        .map_err(|_| script_error(line, format!("invalid longitude `{lng}`")))?;

    GeoPoint::try_new(lat, lng).map_err(|e| script_error(line, e.to_string()))
}

fn script_error(line: usize, message: impl Into<String>) -> FieldError {
    FieldError::Script {
        line,
        message: message.into(),
    }
}
