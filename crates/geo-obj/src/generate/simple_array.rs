//! Normalizer for loosely-typed nested input.
//!
//! Accepts either a bare coordinate structure (`[[0, 0], [1, 1]]`, typed
//! by a hint) or a typed object
//! (`{"type": "POINTZ", "value": [1, 2, 3], "srid": 4326}`) and produces a
//! canonical [`Geometry`].

use log::trace;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::generate::Generator;
use crate::limits::MAX_NESTING_DEPTH;
use crate::model::{shape_of, Dimension, Geometry, GeometryType};
use crate::registry::Registry;

/// Normalizer for plain arrays and `{type, value}` objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleArray;

impl SimpleArray {
    pub fn new() -> Self {
        Self
    }

    /// Normalizes `input`, using `type_hint` when the input names no type.
    pub fn generate(&self, input: Value, type_hint: Option<&str>) -> Result<Geometry> {
        match input {
            Value::Array(_) => {
                let kind = resolve_kind(None, type_hint)?;
                let dimension = infer_dimension(&input);
                trace!("bare {kind} input, inferred dimension {dimension:?}");
                Ok(Geometry {
                    dimension,
                    ..Geometry::new(kind, input)
                })
            }
            Value::Object(map) => generate_object(map, type_hint),
            other => Err(Error::UnsupportedFormat(format!(
                "expected \"array\" or \"object\", \"{}\" found",
                shape_of(&other)
            ))),
        }
    }
}

impl Generator<Value> for SimpleArray {
    fn generate(&self, input: Value, type_hint: Option<&str>) -> Result<Geometry> {
        SimpleArray::generate(self, input, type_hint)
    }
}

fn generate_object(mut map: Map<String, Value>, type_hint: Option<&str>) -> Result<Geometry> {
    // An object without a payload is its own payload.
    let whole = if map.contains_key("value") {
        None
    } else {
        Some(Value::Object(map.clone()))
    };

    let type_name = take_string(&mut map, "type")?;
    let explicit = take_string(&mut map, "dimension")?;
    let srid = take_srid(&mut map)?;
    let properties = take_properties(&mut map)?;
    let value = match whole {
        Some(whole) => whole,
        None => map.remove("value").unwrap_or(Value::Null),
    };

    let explicit_dimension = explicit
        .as_deref()
        .map(|name| {
            Dimension::from_name(name)
                .ok_or_else(|| Error::UnexpectedValue(format!("Unsupported dimension \"{name}\"")))
        })
        .transpose()?;

    let mut base_name = type_name.as_deref();
    let mut suffix_dimension = None;

    if let Some(name) = type_name.as_deref() {
        if value.is_array() {
            if let Some((base, dimension)) = split_dimension_suffix(name) {
                trace!("type {name:?} carries dimension suffix {dimension}");
                base_name = Some(base);
                suffix_dimension = Some(dimension);
            }
        }
    }

    if let (Some(explicit_dimension), Some(suffix_dimension)) =
        (explicit_dimension, suffix_dimension)
    {
        if explicit_dimension != suffix_dimension {
            return Err(Error::Runtime(format!(
                "Specified dimension \"{}\" does not match type \"{}\"",
                explicit.as_deref().unwrap_or_default().to_ascii_uppercase(),
                type_name.as_deref().unwrap_or_default()
            )));
        }
    }

    let kind = resolve_kind(base_name, type_hint)?;
    let dimension = explicit_dimension
        .or(suffix_dimension)
        .or_else(|| infer_dimension(&value));
    trace!("normalized {kind} with dimension {dimension:?}");

    Ok(Geometry {
        kind,
        value,
        srid,
        dimension,
        properties,
    })
}

fn resolve_kind(type_name: Option<&str>, type_hint: Option<&str>) -> Result<GeometryType> {
    match type_name.or(type_hint) {
        Some(name) => Registry::resolve_type(name),
        None => Err(Error::UnsupportedType(String::new())),
    }
}

/// Splits a trailing `Z`, `M` or `ZM` off a type name, e.g.
/// `"POINTZM"` -> (`"POINT"`, ZM) or `"Point M"` -> (`"Point"`, M).
///
/// Only splits when what remains is a known type name.
pub fn split_dimension_suffix(type_name: &str) -> Option<(&str, Dimension)> {
    let trimmed = type_name.trim();

    for dimension in [Dimension::Zm, Dimension::Z, Dimension::M] {
        let suffix = dimension.as_str();
        if trimmed.len() <= suffix.len() {
            continue;
        }
        let at = trimmed.len() - suffix.len();
        if !trimmed.is_char_boundary(at) {
            continue;
        }
        let (base, tail) = trimmed.split_at(at);
        let base = base.trim_end();
        if tail.eq_ignore_ascii_case(suffix) && GeometryType::from_name(base).is_some() {
            return Some((base, dimension));
        }
    }

    None
}

/// Infers the dimension from the first coordinate reached by descending
/// through `{type, value}` wrappers and nested arrays.
///
/// A wrapper that states its dimension, through a `dimension` field or a
/// type suffix, answers for everything below it. Otherwise two ordinates
/// (or an unrecognised count) give `None`, three give Z and four give ZM.
pub fn infer_dimension(value: &Value) -> Option<Dimension> {
    let mut current = value;

    for _ in 0..MAX_NESTING_DEPTH {
        match current {
            Value::Object(map) => {
                if let Some(dimension) = stated_dimension(map) {
                    return Some(dimension);
                }
                current = map.get("value")?;
            }
            Value::Array(items) => match items.first()? {
                Value::Number(_) => return Dimension::from_coordinate_len(items.len()),
                first => current = first,
            },
            _ => return None,
        }
    }

    None
}

/// Dimension a `{type, value}` wrapper declares for itself, if any.
fn stated_dimension(map: &Map<String, Value>) -> Option<Dimension> {
    if let Some(name) = map.get("dimension").and_then(Value::as_str) {
        return Dimension::from_name(name);
    }
    let name = map.get("type")?.as_str()?;
    split_dimension_suffix(name).map(|(_, dimension)| dimension)
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Result<Option<String>> {
    match map.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(Error::UnexpectedValue(format!(
            "Geometry {key} must be \"string\", \"{}\" found",
            shape_of(&other)
        ))),
    }
}

fn take_srid(map: &mut Map<String, Value>) -> Result<Option<u32>> {
    match map.remove("srid") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| {
                Error::UnexpectedValue(format!(
                    "SRID must be an unsigned 32-bit integer, {n} found"
                ))
            }),
        Some(other) => Err(Error::UnexpectedValue(format!(
            "SRID must be \"number\", \"{}\" found",
            shape_of(&other)
        ))),
    }
}

fn take_properties(map: &mut Map<String, Value>) -> Result<Map<String, Value>> {
    match map.remove("properties") {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(properties)) => Ok(properties),
        Some(other) => Err(Error::UnexpectedValue(format!(
            "Geometry properties must be \"object\", \"{}\" found",
            shape_of(&other)
        ))),
    }
}
