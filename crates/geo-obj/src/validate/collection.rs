use serde_json::Value;

use crate::error::{Error, Result};
use crate::generate::{split_dimension_suffix, SimpleArray};
use crate::limits::MAX_NESTING_DEPTH;
use crate::model::{shape_of, Geometry, GeometryType};
use crate::registry::Registry;
use crate::validate::{elements_mut, Validator};

const CONTEXT: &str = "Bad geometry value in GeometryCollection.";

/// Checks a GeometryCollection.
///
/// Members are `{type, value}` objects. Each one is normalized and handed
/// to the validator registered for its own kind; the normalized member is
/// written back with its canonical type name and, when it has one, its
/// dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryCollectionValidator;

impl Validator for GeometryCollectionValidator {
    fn expected_type(&self) -> GeometryType {
        GeometryType::GeometryCollection
    }

    fn validate(&self, geometry: &mut Geometry, registry: &Registry) -> Result<()> {
        self.check_type(geometry)?;
        if nesting_exceeds(&geometry.value, 0) {
            return Err(Error::UnexpectedValue(
                "GeometryCollection nesting is too deep".to_string(),
            ));
        }

        for member in elements_mut(&mut geometry.value, "GeometryCollection")? {
            if !member.is_object() {
                return Err(Error::UnexpectedValue(format!(
                    "GeometryCollection value must be array of \"object\", \"{}\" found",
                    shape_of(member)
                )));
            }

            let mut normalized = SimpleArray
                .generate(member.clone(), None)
                .map_err(|e| Error::range(CONTEXT, e))?;
            let validator = registry.require(normalized.kind)?;
            validator
                .validate(&mut normalized, registry)
                .map_err(|e| Error::range(CONTEXT, e))?;

            if let Value::Object(map) = member {
                map.insert("type".to_string(), Value::from(normalized.kind.name()));
                map.insert("value".to_string(), normalized.value);
                match normalized.dimension {
                    Some(dimension) => {
                        map.insert("dimension".to_string(), Value::from(dimension.as_str()));
                    }
                    None => {
                        map.remove("dimension");
                    }
                }
            }
        }

        Ok(())
    }
}

/// True when GeometryCollection members nest deeper than
/// [`MAX_NESTING_DEPTH`] below `value`.
///
/// Recursion stops at the limit, so the check itself is bounded.
fn nesting_exceeds(value: &Value, depth: usize) -> bool {
    if depth >= MAX_NESTING_DEPTH {
        return true;
    }
    let Some(members) = value.as_array() else {
        return false;
    };

    members.iter().any(|member| {
        member_kind(member) == Some(GeometryType::GeometryCollection)
            && member
                .get("value")
                .is_some_and(|inner| nesting_exceeds(inner, depth + 1))
    })
}

/// Kind named by a member's `type`, with or without a dimension suffix.
fn member_kind(member: &Value) -> Option<GeometryType> {
    let name = member.get("type")?.as_str()?;
    GeometryType::from_name(name).or_else(|| {
        let (base, _) = split_dimension_suffix(name)?;
        GeometryType::from_name(base)
    })
}
