//! Generators: turn external input into canonical geometries.
//!
//! - [`SimpleArray`]: plain nested arrays and `{type, value}` objects
//! - [`GeoJson`]: GeoJSON geometry and feature text

pub mod geojson;
pub mod simple_array;

pub use geojson::GeoJson;
pub use simple_array::{infer_dimension, split_dimension_suffix, SimpleArray};

use crate::error::Result;
use crate::model::Geometry;

/// Produces a canonical [`Geometry`] from some input representation.
pub trait Generator<I> {
    /// Converts `input`; `type_hint` names the geometry kind when the input
    /// does not carry one.
    fn generate(&self, input: I, type_hint: Option<&str>) -> Result<Geometry>;
}
