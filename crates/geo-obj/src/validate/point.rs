use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{shape_of, Geometry, GeometryType};
use crate::registry::Registry;
use crate::validate::Validator;

/// Checks a single coordinate.
///
/// The value must be an array of finite numbers whose length matches the
/// geometry's dimension (2 without one, 3 for Z or M, 4 for ZM). Integral
/// ordinates are rewritten as floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointValidator;

impl Validator for PointValidator {
    fn expected_type(&self) -> GeometryType {
        GeometryType::Point
    }

    fn validate(&self, geometry: &mut Geometry, _registry: &Registry) -> Result<()> {
        self.check_type(geometry)?;

        let expected = geometry.coordinate_len();
        let shape = shape_of(&geometry.value);
        let ordinates = geometry.value.as_array_mut().ok_or_else(|| {
            Error::UnexpectedValue(format!(
                "Point value must be array of \"number\", \"{shape}\" found"
            ))
        })?;

        if ordinates.len() != expected {
            return Err(Error::UnexpectedValue(format!(
                "Point value must have {expected} ordinates, {} found",
                ordinates.len()
            )));
        }

        for ordinate in ordinates.iter_mut() {
            let number = ordinate.as_f64().ok_or_else(|| {
                Error::UnexpectedValue(format!(
                    "Point value must be array of \"number\", \"{}\" found in array",
                    shape_of(ordinate)
                ))
            })?;
            if !number.is_finite() {
                return Err(Error::UnexpectedValue(format!(
                    "Point ordinate {number} is not finite"
                )));
            }
            *ordinate = Value::from(number);
        }

        Ok(())
    }
}
