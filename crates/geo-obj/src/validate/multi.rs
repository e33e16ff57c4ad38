use crate::error::{Error, Result};
use crate::model::{Geometry, GeometryType};
use crate::registry::Registry;
use crate::validate::{delegate, elements_mut, expect_array, Validator};

/// Checks a MultiLineString by delegating each member to the registered
/// LineString validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiLineStringValidator;

/// Checks a MultiPolygon by delegating each member to the registered
/// Polygon validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiPolygonValidator;

impl Validator for MultiLineStringValidator {
    fn expected_type(&self) -> GeometryType {
        GeometryType::MultiLineString
    }

    fn validate(&self, geometry: &mut Geometry, registry: &Registry) -> Result<()> {
        self.check_type(geometry)?;
        validate_members(
            geometry,
            registry,
            GeometryType::LineString,
            "Bad line string value in MultiLineString.",
        )
    }
}

impl Validator for MultiPolygonValidator {
    fn expected_type(&self) -> GeometryType {
        GeometryType::MultiPolygon
    }

    fn validate(&self, geometry: &mut Geometry, registry: &Registry) -> Result<()> {
        self.check_type(geometry)?;
        validate_members(
            geometry,
            registry,
            GeometryType::Polygon,
            "Bad polygon value in MultiPolygon.",
        )
    }
}

fn validate_members(
    geometry: &mut Geometry,
    registry: &Registry,
    member: GeometryType,
    context: &str,
) -> Result<()> {
    let owner = geometry.kind.name();
    let dimension = geometry.dimension;

    for element in elements_mut(&mut geometry.value, owner)? {
        expect_array(element, owner)?;
        delegate(registry, member, dimension, element).map_err(|e| Error::range(context, e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_valid_multi_line_string() {
        let registry = Registry::with_defaults();
        let mut geometry = Geometry::new(
            GeometryType::MultiLineString,
            json!([
                [[0, 0], [10, 0], [10, 10], [0, 10]],
                [[5, 5], [7, 5], [7, 7], [5, 7]]
            ]),
        );
        MultiLineStringValidator.validate(&mut geometry, &registry).unwrap();
    }

    #[test]
    fn test_bad_line_string() {
        let registry = Registry::with_defaults();
        let mut geometry = Geometry::new(GeometryType::MultiLineString, json!([[[0, 0]], [0, 0]]));
        let err = MultiLineStringValidator.validate(&mut geometry, &registry).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(
            err.to_string(),
            "Bad line string value in MultiLineString. \
             LineString value must be array of \"array\", \"number\" found"
        );
    }

    #[test]
    fn test_multi_polygon_nests_three_levels() {
        let registry = Registry::with_defaults();
        let mut geometry = Geometry::new(
            GeometryType::MultiPolygon,
            json!([
                [[[0, 0], [10, 0], [10, 10], [0, 0]]],
                [[[1, 1], [3, 1], [3, 3, 3], [1, 1]]]
            ]),
        );
        let err = MultiPolygonValidator.validate(&mut geometry, &registry).unwrap_err();

        assert!(err.to_string().starts_with(
            "Bad polygon value in MultiPolygon. Bad ring value in Polygon. Bad point value in ring."
        ));
        assert_eq!(err.root_cause().kind(), ErrorKind::UnexpectedValue);
    }

    #[test]
    fn test_multi_polygon_non_array_member() {
        let registry = Registry::with_defaults();
        let mut geometry = Geometry::new(GeometryType::MultiPolygon, json!([null]));
        let err = MultiPolygonValidator.validate(&mut geometry, &registry).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedValue);
        assert_eq!(
            err.to_string(),
            "MultiPolygon value must be array of \"array\", \"null\" found"
        );
    }
}
