//! fieldarea - Capture field and plot boundaries and compute their area in hectares

pub mod api;
pub mod capture;
pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;

pub use error::{FieldError, Result};
