//! Data model types for geo-obj.
//!
//! This module contains the canonical geometry representation:
//! - Geometry kinds and their WKB codes
//! - Coordinate dimensions
//! - The canonical geometry value
//! - Builders (ergonomic construction)

pub mod builder;
pub mod geometry;
pub mod geometry_type;

pub use builder::{CollectionBuilder, GeometryBuilder};
pub use geometry::{shape_of, Geometry};
pub use geometry_type::{coordinate_len, Dimension, GeometryType};
