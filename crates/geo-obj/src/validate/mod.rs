//! Structural validation for canonical geometries.
//!
//! Each geometry kind has a [`Validator`]. Composite validators never name
//! their element validators directly: they look them up in the
//! [`Registry`] they are handed, so replacing the Point validator changes
//! how every MultiPoint, LineString and Polygon is checked.
//!
//! Failures inside an element are re-raised as [`Error::Range`] with the
//! container's context prepended; [`Error::root_cause`] recovers the
//! original failure.
//!
//! **Note:** Only structure and arity are checked. Polygon rings are not
//! required to be closed.

mod collection;
mod multi;
mod point;
mod point_list;
mod polygon;

use std::fmt;

use serde_json::Value;

pub use collection::GeometryCollectionValidator;
pub use multi::{MultiLineStringValidator, MultiPolygonValidator};
pub use point::PointValidator;
pub use point_list::{LineStringValidator, MultiPointValidator};
pub use polygon::PolygonValidator;

use crate::error::{Error, Result};
use crate::model::{shape_of, Dimension, Geometry, GeometryType};
use crate::registry::Registry;

/// Checks, and may normalize in place, one kind of geometry.
pub trait Validator: fmt::Debug + Send + Sync {
    /// The kind this validator accepts.
    fn expected_type(&self) -> GeometryType;

    /// Validates `geometry`, resolving element validators through
    /// `registry`.
    fn validate(&self, geometry: &mut Geometry, registry: &Registry) -> Result<()>;

    /// Fails unless `geometry` is of the expected kind.
    fn check_type(&self, geometry: &Geometry) -> Result<()> {
        let expected = self.expected_type();
        if geometry.kind != expected {
            return Err(Error::UnexpectedValue(format!(
                "Unsupported type \"{}\" for value, expected \"{}\"",
                geometry.kind, expected
            )));
        }
        Ok(())
    }
}

/// Validates a geometry with the validator registered for its kind.
pub fn validate_geometry(geometry: &mut Geometry, registry: &Registry) -> Result<()> {
    registry.require(geometry.kind)?.validate(geometry, registry)
}

/// Borrows the payload elements, failing if `value` is not an array.
///
/// `owner` names what the array belongs to in the error message.
fn elements_mut<'v>(value: &'v mut Value, owner: &str) -> Result<&'v mut Vec<Value>> {
    let shape = shape_of(value);
    value.as_array_mut().ok_or_else(|| {
        Error::UnexpectedValue(format!(
            "{owner} value must be \"array\", \"{shape}\" found"
        ))
    })
}

/// Fails unless `element` is an array.
fn expect_array(element: &Value, owner: &str) -> Result<()> {
    if element.is_array() {
        return Ok(());
    }
    Err(Error::UnexpectedValue(format!(
        "{owner} value must be array of \"array\", \"{}\" found",
        shape_of(element)
    )))
}

/// Runs the registered validator for `kind` on a single element.
///
/// The element is moved into a temporary geometry carrying `dimension`
/// and moved back afterwards, keeping any normalization the validator did.
fn delegate(
    registry: &Registry,
    kind: GeometryType,
    dimension: Option<Dimension>,
    element: &mut Value,
) -> Result<()> {
    let validator = registry.require(kind)?;
    let mut child = Geometry {
        dimension,
        ..Geometry::new(kind, std::mem::take(element))
    };
    let result = validator.validate(&mut child, registry);
    *element = child.value;
    result
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_validate_geometry_dispatches_by_kind() {
        let registry = Registry::with_defaults();
        let mut geometry = Geometry::new(GeometryType::LineString, json!([[0, 0], [1, 1]]));
        validate_geometry(&mut geometry, &registry).unwrap();
        assert_eq!(geometry.value, json!([[0.0, 0.0], [1.0, 1.0]]));
    }

    #[test]
    fn test_unregistered_kind() {
        let registry = Registry::with_defaults();
        let mut geometry = Geometry::new(GeometryType::Tin, json!([]));
        let err = validate_geometry(&mut geometry, &registry).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
    }

    #[test]
    fn test_type_mismatch() {
        let registry = Registry::with_defaults();
        let mut geometry = Geometry::new(GeometryType::Polygon, json!([0, 0]));
        let err = PointValidator.validate(&mut geometry, &registry).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedValue);
        assert_eq!(
            err.to_string(),
            "Unsupported type \"Polygon\" for value, expected \"Point\""
        );
    }

    #[test]
    fn test_custom_element_validator_is_used_by_composites() {
        #[derive(Debug)]
        struct RejectAll;

        impl Validator for RejectAll {
            fn expected_type(&self) -> GeometryType {
                GeometryType::Point
            }

            fn validate(&self, _geometry: &mut Geometry, _registry: &Registry) -> Result<()> {
                Err(Error::UnexpectedValue("rejected".to_string()))
            }
        }

        let mut registry = Registry::with_defaults();
        registry.register("Point", Box::new(RejectAll)).unwrap();

        let mut geometry = Geometry::new(GeometryType::MultiPoint, json!([[0, 0]]));
        let err = validate_geometry(&mut geometry, &registry).unwrap_err();
        assert_eq!(err.to_string(), "Bad point value in MultiPoint. rejected");
    }

    #[test]
    fn test_missing_element_validator() {
        let mut registry = Registry::new();
        registry
            .register("MultiPoint", Box::new(MultiPointValidator))
            .unwrap();

        let mut geometry = Geometry::new(GeometryType::MultiPoint, json!([[0, 0]]));
        let err = validate_geometry(&mut geometry, &registry).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.root_cause().kind(), ErrorKind::UnsupportedType);
    }
}
