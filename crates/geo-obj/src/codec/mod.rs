//! Output formats for canonical geometries.
//!
//! - [`Wkb`]: Well-Known Binary, OGC or PostGIS (EWKB) dialect
//! - [`Wkt`]: Well-Known Text, with an EWKT flavour
//! - [`hex`]: hex helpers for WKB payloads

pub mod hex;
pub mod primitives;
pub mod wkb;
pub mod wkt;

pub use hex::{decode_hex, encode_hex};
pub use primitives::{native_byte_order, ByteOrder, Writer};
pub use wkb::{Dialect, Wkb};
pub use wkt::Wkt;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::generate::SimpleArray;
use crate::limits::{MAX_COORDINATE_DIMS, MAX_NESTING_DEPTH, MIN_COORDINATE_DIMS};
use crate::model::{shape_of, Geometry};

/// Serializes a [`Geometry`] into some output representation.
pub trait Formatter {
    type Output;

    fn format(&self, geometry: &Geometry) -> Result<Self::Output>;
}

/// A coordinate read out of a payload, without allocating.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Coordinate {
    ordinates: [f64; MAX_COORDINATE_DIMS],
    len: usize,
}

impl Coordinate {
    pub(crate) fn as_slice(&self) -> &[f64] {
        &self.ordinates[..self.len]
    }
}

/// Borrows the elements of an array payload.
pub(crate) fn elements<'v>(value: &'v Value, owner: &str) -> Result<&'v [Value]> {
    value.as_array().map(Vec::as_slice).ok_or_else(|| {
        Error::UnexpectedValue(format!(
            "{owner} value must be \"array\", \"{}\" found",
            shape_of(value)
        ))
    })
}

/// Reads one coordinate of exactly `expected` numeric ordinates.
pub(crate) fn read_coordinate(value: &Value, expected: usize) -> Result<Coordinate> {
    let items = value.as_array().ok_or_else(|| {
        Error::UnexpectedValue(format!(
            "Point value must be array of \"number\", \"{}\" found",
            shape_of(value)
        ))
    })?;

    let arity = MIN_COORDINATE_DIMS..=MAX_COORDINATE_DIMS;
    if !arity.contains(&items.len()) || items.len() != expected {
        return Err(Error::UnexpectedValue(format!(
            "Point value must have {expected} ordinates, {} found",
            items.len()
        )));
    }

    let mut coordinate = Coordinate {
        ordinates: [0.0; MAX_COORDINATE_DIMS],
        len: items.len(),
    };
    for (slot, item) in coordinate.ordinates.iter_mut().zip(items) {
        *slot = item.as_f64().ok_or_else(|| {
            Error::UnexpectedValue(format!(
                "Point value must be array of \"number\", \"{}\" found",
                shape_of(item)
            ))
        })?;
    }
    Ok(coordinate)
}

/// Normalizes one `{type, value}` member of a GeometryCollection.
pub(crate) fn collection_member(member: &Value, depth: usize) -> Result<Geometry> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(Error::UnexpectedValue(
            "GeometryCollection nesting is too deep".to_string(),
        ));
    }
    if !member.is_object() {
        return Err(Error::UnexpectedValue(format!(
            "GeometryCollection value must be array of \"object\", \"{}\" found",
            shape_of(member)
        )));
    }
    SimpleArray.generate(member.clone(), None)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_read_coordinate() {
        let coordinate = read_coordinate(&json!([1, 2.5, -3]), 3).unwrap();
        assert_eq!(coordinate.as_slice(), &[1.0, 2.5, -3.0]);
    }

    #[test]
    fn test_read_coordinate_rejects_bad_arity() {
        for (value, expected) in [
            (json!([1]), 2),
            (json!([1, 2, 3, 4, 5]), 5),
            (json!([1, 2, 3]), 2),
        ] {
            let err = read_coordinate(&value, expected).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnexpectedValue);
        }
    }

    #[test]
    fn test_read_coordinate_rejects_non_numbers() {
        let err = read_coordinate(&json!([1, "2"]), 2).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Point value must be array of \"number\", \"string\" found"
        );
        assert!(read_coordinate(&json!({"x": 1}), 2).is_err());
    }
}
