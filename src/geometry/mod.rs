pub mod area;
pub mod bounds;
pub mod point;
pub mod projection;

pub use area::{polygon_area_hectares, polygon_area_square_meters};
pub use bounds::{Bounds, vertex_centroid};
pub use point::GeoPoint;
pub use projection::Projector;
