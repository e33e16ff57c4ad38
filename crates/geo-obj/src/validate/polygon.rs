use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{Dimension, Geometry, GeometryType};
use crate::registry::Registry;
use crate::validate::{delegate, elements_mut, expect_array, Validator};

/// Checks a Polygon: an array of rings, each an array of points.
///
/// Ring closure is not checked; open rings are accepted.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolygonValidator;

impl Validator for PolygonValidator {
    fn expected_type(&self) -> GeometryType {
        GeometryType::Polygon
    }

    fn validate(&self, geometry: &mut Geometry, registry: &Registry) -> Result<()> {
        self.check_type(geometry)?;

        let dimension = geometry.dimension;
        for ring in elements_mut(&mut geometry.value, "Polygon")? {
            expect_array(ring, "Polygon")?;
            validate_ring(ring, dimension, registry)
                .map_err(|e| Error::range("Bad ring value in Polygon.", e))?;
        }

        Ok(())
    }
}

fn validate_ring(
    ring: &mut Value,
    dimension: Option<Dimension>,
    registry: &Registry,
) -> Result<()> {
    for point in elements_mut(ring, "Ring")? {
        validate_ring_point(point, dimension, registry)
            .map_err(|e| Error::range("Bad point value in ring.", e))?;
    }
    Ok(())
}

fn validate_ring_point(
    point: &mut Value,
    dimension: Option<Dimension>,
    registry: &Registry,
) -> Result<()> {
    expect_array(point, "Ring")?;
    delegate(registry, GeometryType::Point, dimension, point)
}
