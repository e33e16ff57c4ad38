//! The canonical geometry value.
//!
//! Every generator produces a [`Geometry`], every validator inspects one
//! and every formatter consumes one.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::geometry_type::{coordinate_len, Dimension, GeometryType};

/// A geometry in canonical form.
///
/// The payload stays loosely typed so that validators can report exactly
/// which part of a malformed input is wrong:
///
/// | kind                 | `value`                                  |
/// |----------------------|------------------------------------------|
/// | Point                | `[x, y, ...]`                            |
/// | LineString           | `[[x, y], ...]`                          |
/// | Polygon              | `[[[x, y], ...], ...]` (rings)           |
/// | MultiPoint           | `[[x, y], ...]`                          |
/// | MultiLineString      | array of LineString payloads             |
/// | MultiPolygon         | array of Polygon payloads                |
/// | GeometryCollection   | array of `{"type": .., "value": ..}`     |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: GeometryType,
    pub value: Value,
    #[serde(default)]
    pub srid: Option<u32>,
    #[serde(default)]
    pub dimension: Option<Dimension>,
    /// Pass-through metadata, never encoded.
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Geometry {
    /// Creates a geometry without SRID, dimension or properties.
    pub fn new(kind: GeometryType, value: Value) -> Self {
        Self {
            kind,
            value,
            srid: None,
            dimension: None,
            properties: Map::new(),
        }
    }

    /// Creates a child geometry of `kind` sharing this geometry's dimension.
    ///
    /// Used when a composite hands one of its elements to the validator or
    /// serializer of the element kind.
    pub fn element(&self, kind: GeometryType, value: Value) -> Geometry {
        Geometry {
            dimension: self.dimension,
            ..Geometry::new(kind, value)
        }
    }

    /// Number of ordinates each coordinate is expected to carry.
    pub fn coordinate_len(&self) -> usize {
        coordinate_len(self.dimension)
    }
}

/// Names the runtime shape of a loosely-typed value, for error messages.
pub fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
