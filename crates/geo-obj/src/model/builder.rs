//! Builder API for ergonomic Geometry construction.
//!
//! Provides a fluent interface for building canonical geometries without
//! writing the loosely-typed payload by hand.
//!
//! # Example
//!
//! ```rust
//! use geo_obj::model::builder::GeometryBuilder;
//! use geo_obj::{Dimension, GeometryType};
//!
//! let polygon = GeometryBuilder::polygon([
//!     vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 0.0]],
//! ])
//! .srid(4326)
//! .property("name", "square-ish")
//! .build();
//!
//! assert_eq!(polygon.kind, GeometryType::Polygon);
//!
//! let collection = GeometryBuilder::collection(|c| c
//!     .member(GeometryBuilder::point([1.0, 2.0, 3.0]).dimension(Dimension::Z).build())
//!     .member(GeometryBuilder::line_string([[0.0, 0.0], [1.0, 1.0]]).build())
//! )
//! .build();
//!
//! assert_eq!(collection.value.as_array().map(Vec::len), Some(2));
//! ```

use serde_json::{json, Map, Value};

use crate::model::{Dimension, Geometry, GeometryType};

/// Builder for constructing a [`Geometry`].
#[derive(Debug, Clone)]
pub struct GeometryBuilder {
    kind: GeometryType,
    value: Value,
    srid: Option<u32>,
    dimension: Option<Dimension>,
    properties: Map<String, Value>,
}

impl GeometryBuilder {
    /// Creates a builder for `kind` with an empty payload.
    pub fn new(kind: GeometryType) -> Self {
        Self {
            kind,
            value: Value::Array(Vec::new()),
            srid: None,
            dimension: None,
            properties: Map::new(),
        }
    }

    // =========================================================================
    // Payload Shapes
    // =========================================================================

    /// Starts a Point from its ordinates.
    pub fn point(coordinate: impl AsRef<[f64]>) -> Self {
        Self::new(GeometryType::Point).value(coordinate_value(coordinate.as_ref()))
    }

    /// Starts a LineString from its points.
    pub fn line_string<C: AsRef<[f64]>>(points: impl IntoIterator<Item = C>) -> Self {
        Self::new(GeometryType::LineString).value(points_value(points))
    }

    /// Starts a MultiPoint from its points.
    pub fn multi_point<C: AsRef<[f64]>>(points: impl IntoIterator<Item = C>) -> Self {
        Self::new(GeometryType::MultiPoint).value(points_value(points))
    }

    /// Starts a Polygon from its rings.
    pub fn polygon<C, R>(rings: impl IntoIterator<Item = R>) -> Self
    where
        C: AsRef<[f64]>,
        R: IntoIterator<Item = C>,
    {
        Self::new(GeometryType::Polygon).value(rings_value(rings))
    }

    /// Starts a MultiLineString from its line strings.
    pub fn multi_line_string<C, L>(lines: impl IntoIterator<Item = L>) -> Self
    where
        C: AsRef<[f64]>,
        L: IntoIterator<Item = C>,
    {
        Self::new(GeometryType::MultiLineString).value(rings_value(lines))
    }

    /// Starts a MultiPolygon from its polygons, each a list of rings.
    pub fn multi_polygon<C, R, P>(polygons: impl IntoIterator<Item = P>) -> Self
    where
        C: AsRef<[f64]>,
        R: IntoIterator<Item = C>,
        P: IntoIterator<Item = R>,
    {
        let value = polygons.into_iter().map(rings_value).collect();
        Self::new(GeometryType::MultiPolygon).value(Value::Array(value))
    }

    /// Starts a GeometryCollection using a builder function.
    pub fn collection<F>(f: F) -> Self
    where
        F: FnOnce(CollectionBuilder) -> CollectionBuilder,
    {
        let members = f(CollectionBuilder::default()).members;
        Self::new(GeometryType::GeometryCollection).value(Value::Array(members))
    }

    // =========================================================================
    // Metadata
    // =========================================================================

    /// Replaces the payload.
    pub fn value(mut self, value: Value) -> Self {
        self.value = value;
        self
    }

    /// Sets the spatial reference identifier.
    pub fn srid(mut self, srid: u32) -> Self {
        self.srid = Some(srid);
        self
    }

    /// Sets the coordinate dimension.
    pub fn dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = Some(dimension);
        self
    }

    /// Adds a pass-through property.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Builds the final Geometry.
    pub fn build(self) -> Geometry {
        Geometry {
            kind: self.kind,
            value: self.value,
            srid: self.srid,
            dimension: self.dimension,
            properties: self.properties,
        }
    }
}

/// Builder for the members of a GeometryCollection.
#[derive(Debug, Clone, Default)]
pub struct CollectionBuilder {
    members: Vec<Value>,
}

impl CollectionBuilder {
    /// Appends a member geometry.
    ///
    /// Members keep their own type and dimension; SRID and properties
    /// belong to the collection.
    pub fn member(mut self, geometry: Geometry) -> Self {
        let mut member = json!({
            "type": geometry.kind.name(),
            "value": geometry.value,
        });
        if let (Some(dimension), Value::Object(map)) = (geometry.dimension, &mut member) {
            map.insert("dimension".to_string(), Value::from(dimension.as_str()));
        }
        self.members.push(member);
        self
    }
}

fn coordinate_value(coordinate: &[f64]) -> Value {
    Value::Array(coordinate.iter().copied().map(Value::from).collect())
}

fn points_value<C: AsRef<[f64]>>(points: impl IntoIterator<Item = C>) -> Value {
    Value::Array(
        points
            .into_iter()
            .map(|p| coordinate_value(p.as_ref()))
            .collect(),
    )
}

fn rings_value<C, R>(rings: impl IntoIterator<Item = R>) -> Value
where
    C: AsRef<[f64]>,
    R: IntoIterator<Item = C>,
{
    Value::Array(rings.into_iter().map(points_value).collect())
}
