pub mod polygon;
pub mod record;
pub mod units;

pub use polygon::{Polygon, boundary_points};
pub use record::{FieldRecord, RecordKind};
pub use units::{AreaUnit, SurfaceArea};
