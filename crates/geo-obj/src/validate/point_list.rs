use crate::error::{Error, Result};
use crate::model::{Geometry, GeometryType};
use crate::registry::Registry;
use crate::validate::{delegate, elements_mut, expect_array, Validator};

/// Checks a LineString: an array of points.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineStringValidator;

/// Checks a MultiPoint: an array of points.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiPointValidator;

impl Validator for LineStringValidator {
    fn expected_type(&self) -> GeometryType {
        GeometryType::LineString
    }

    fn validate(&self, geometry: &mut Geometry, registry: &Registry) -> Result<()> {
        self.check_type(geometry)?;
        validate_points(geometry, registry, "LineString")
    }
}

impl Validator for MultiPointValidator {
    fn expected_type(&self) -> GeometryType {
        GeometryType::MultiPoint
    }

    fn validate(&self, geometry: &mut Geometry, registry: &Registry) -> Result<()> {
        self.check_type(geometry)?;
        validate_points(geometry, registry, "MultiPoint")
    }
}

/// Hands every element to the registered Point validator.
fn validate_points(geometry: &mut Geometry, registry: &Registry, owner: &str) -> Result<()> {
    let dimension = geometry.dimension;
    let context = format!("Bad point value in {owner}.");

    for point in elements_mut(&mut geometry.value, owner)? {
        expect_array(point, owner)?;
        delegate(registry, GeometryType::Point, dimension, point)
            .map_err(|e| Error::range(&context, e))?;
    }

    Ok(())
}
