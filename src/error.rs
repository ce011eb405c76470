use thiserror::Error;

/// Errors raised at the input edges of the crate.
///
/// The geometry itself never fails; these only come from parsing
/// coordinates, persisted polygons, units and session scripts.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("invalid coordinate ({lat}, {lng}): latitude must be within -90..90 and longitude within -180..180")]
    InvalidCoordinate { lat: f64, lng: f64 },

    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown area unit: {0} (expected m2, ha or ac)")]
    UnknownUnit(String),

    #[error("unknown record kind: {0} (expected location or plot)")]
    UnknownKind(String),

    #[error("script line {line}: {message}")]
    Script { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, FieldError>;
