pub mod nominatim;

pub use nominatim::{Place, geocode_place};
