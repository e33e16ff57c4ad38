//! GeoJSON text generator.
//!
//! Accepts a GeoJSON geometry object or a Feature wrapping one. Features
//! contribute their `properties`; FeatureCollections are not accepted.

use serde_json::{json, Map, Value};

use crate::error::{Error, Result};
use crate::generate::{Generator, SimpleArray};
use crate::limits::MAX_NESTING_DEPTH;
use crate::model::{shape_of, Geometry, GeometryType};

/// Generator for GeoJSON text.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoJson;

impl GeoJson {
    pub fn new() -> Self {
        Self
    }

    /// Parses `input` and normalizes the geometry it describes.
    pub fn generate(&self, input: &str, type_hint: Option<&str>) -> Result<Geometry> {
        if !input.trim_start().starts_with('{') {
            return Err(Error::UnsupportedFormat(
                "GeoJSON input must be a JSON object".to_string(),
            ));
        }

        let document: Value =
            serde_json::from_str(input).map_err(|e| Error::UnexpectedValue(e.to_string()))?;
        let Value::Object(mut object) = document else {
            return Err(Error::UnsupportedFormat(
                "GeoJSON input must be a JSON object".to_string(),
            ));
        };

        let mut properties = Value::Null;
        if object.get("type").and_then(Value::as_str) == Some("Feature") {
            properties = object.remove("properties").unwrap_or(Value::Null);
            object = match object.remove("geometry") {
                Some(Value::Object(geometry)) => geometry,
                Some(other) => {
                    return Err(Error::UnexpectedValue(format!(
                        "Feature geometry must be \"object\", \"{}\" found",
                        shape_of(&other)
                    )))
                }
                None => return Err(Error::UnexpectedValue("Feature has no geometry".to_string())),
            };
        }

        let mut typed = typed_object(object, 0)?;
        if let Value::Object(map) = &mut typed {
            map.insert("properties".to_string(), properties);
        }

        SimpleArray.generate(typed, type_hint)
    }
}

impl<'a> Generator<&'a str> for GeoJson {
    fn generate(&self, input: &'a str, type_hint: Option<&str>) -> Result<Geometry> {
        GeoJson::generate(self, input, type_hint)
    }
}

/// Rewrites a GeoJSON geometry object as a `{type, value}` object.
fn typed_object(mut geometry: Map<String, Value>, depth: usize) -> Result<Value> {
    if depth > MAX_NESTING_DEPTH {
        return Err(Error::UnexpectedValue(
            "GeometryCollection nesting is too deep".to_string(),
        ));
    }

    let type_name = match geometry.remove("type") {
        Some(Value::String(name)) => name,
        Some(other) => {
            return Err(Error::UnexpectedValue(format!(
                "GeoJSON type must be \"string\", \"{}\" found",
                shape_of(&other)
            )))
        }
        None => return Err(Error::UnexpectedValue("GeoJSON object has no type".to_string())),
    };

    let kind = match GeometryType::from_name(&type_name) {
        Some(
            kind @ (GeometryType::Point
            | GeometryType::LineString
            | GeometryType::Polygon
            | GeometryType::MultiPoint
            | GeometryType::MultiLineString
            | GeometryType::MultiPolygon
            | GeometryType::GeometryCollection),
        ) => kind,
        _ => {
            return Err(Error::UnexpectedValue(format!(
                "Unsupported GeoJSON type \"{type_name}\""
            )))
        }
    };

    let value = if kind == GeometryType::GeometryCollection {
        let members = match geometry.remove("geometries") {
            Some(Value::Array(members)) => members,
            _ => {
                return Err(Error::UnexpectedValue(
                    "GeometryCollection must have a \"geometries\" array".to_string(),
                ))
            }
        };
        let members = members
            .into_iter()
            .map(|member| match member {
                Value::Object(member) => typed_object(member, depth + 1),
                other => Err(Error::UnexpectedValue(format!(
                    "GeometryCollection member must be \"object\", \"{}\" found",
                    shape_of(&other)
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        Value::Array(members)
    } else {
        geometry.remove("coordinates").ok_or_else(|| {
            Error::UnexpectedValue(format!("{kind} must have \"coordinates\""))
        })?
    };

    Ok(json!({ "type": kind.name(), "value": value }))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;
    use crate::model::Dimension;

    fn generate(input: &str) -> Result<Geometry> {
        GeoJson.generate(input, None)
    }

    #[test]
    fn test_point() {
        let geometry = generate(r#"{"type":"Point","coordinates":[0,0]}"#).unwrap();
        assert_eq!(geometry, Geometry::new(GeometryType::Point, json!([0, 0])));
    }

    #[test]
    fn test_shapes() {
        let geometry =
            generate(r#"{"type":"LineString","coordinates":[[0,0],[1,1],[2,2]]}"#).unwrap();
        assert_eq!(geometry.kind, GeometryType::LineString);
        assert_eq!(geometry.value, json!([[0, 0], [1, 1], [2, 2]]));

        let geometry = generate(
            r#"{"type":"MultiLineString","coordinates":[[[0,0],[1,1],[2,2]],[[4,4],[5,5],[6,6]]]}"#,
        )
        .unwrap();
        assert_eq!(geometry.kind, GeometryType::MultiLineString);
        assert_eq!(geometry.value[1], json!([[4, 4], [5, 5], [6, 6]]));

        let geometry =
            generate(r#"{"type":"MultiPoint","coordinates":[[0,0,1],[1,1,1]]}"#).unwrap();
        assert_eq!(geometry.dimension, Some(Dimension::Z));
    }

    #[test]
    fn test_feature_properties() {
        let geometry = generate(
            r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[1,2]},"properties":{"name":"a"}}"#,
        )
        .unwrap();
        assert_eq!(geometry.kind, GeometryType::Point);
        assert_eq!(geometry.properties["name"], "a");
    }

    #[test]
    fn test_geometry_collection() {
        let geometry = generate(
            r#"{"type":"GeometryCollection","geometries":[
                {"type":"Point","coordinates":[10,10]},
                {"type":"LineString","coordinates":[[15,15],[20,20]]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(geometry.kind, GeometryType::GeometryCollection);
        assert_eq!(
            geometry.value,
            json!([
                {"type": "Point", "value": [10, 10]},
                {"type": "LineString", "value": [[15, 15], [20, 20]]}
            ])
        );
    }

    #[test]
    fn test_unsupported_format() {
        for input in ["POINT(0 0)", "79:56:55W 40:26:46N", "<xml>", "[0, 0]"] {
            let err = generate(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedFormat, "input {input:?}");
        }
    }

    #[test]
    fn test_bad_json() {
        for input in ["{\"foo\":\"bar\"}}", "{'foo':'bar'}", "{\u{1}"] {
            let err = generate(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnexpectedValue, "input {input:?}");
        }
    }

    #[test]
    fn test_bad_type() {
        let err = generate(r#"{"type":"Bad"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedValue);
        assert_eq!(err.to_string(), "Unsupported GeoJSON type \"Bad\"");

        let err = generate(r#"{"type":"Tin","coordinates":[]}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedValue);
    }
}
