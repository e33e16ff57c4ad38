//! Well-Known Text formatting.
//!
//! Numbers print in shortest round-trip form, so `10.0` becomes `10`.
//! The PostGIS flavour prefixes geometries that carry an SRID with
//! `SRID=<n>;` (EWKT).

use serde_json::Value;

use crate::codec::wkb::Dialect;
use crate::codec::{collection_member, elements, read_coordinate, Formatter};
use crate::error::{Error, Result};
use crate::model::{coordinate_len, Dimension, Geometry, GeometryType};

/// WKT formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wkt {
    dialect: Dialect,
}

impl Wkt {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Formatter emitting `SRID=<n>;` prefixes.
    pub fn extended() -> Self {
        Self::new(Dialect::PostGis)
    }

    /// Formats `geometry` as WKT.
    pub fn to_wkt(&self, geometry: &Geometry) -> Result<String> {
        let mut out = String::new();
        if self.dialect == Dialect::PostGis {
            if let Some(srid) = geometry.srid {
                out.push_str(&format!("SRID={srid};"));
            }
        }
        write_tagged(&mut out, geometry.kind, geometry.dimension, &geometry.value, 0)?;
        Ok(out)
    }
}

impl Formatter for Wkt {
    type Output = String;

    fn format(&self, geometry: &Geometry) -> Result<String> {
        self.to_wkt(geometry)
    }
}

/// Writes `KIND[ dim](body)`, or `KIND[ dim] EMPTY`.
fn write_tagged(
    out: &mut String,
    kind: GeometryType,
    dimension: Option<Dimension>,
    value: &Value,
    depth: usize,
) -> Result<()> {
    out.push_str(&kind.name().to_ascii_uppercase());
    if let Some(dimension) = dimension {
        out.push(' ');
        out.push_str(dimension.as_str());
    }

    if value.as_array().is_some_and(Vec::is_empty) {
        out.push_str(" EMPTY");
        return Ok(());
    }

    let len = coordinate_len(dimension);
    match kind {
        GeometryType::Point => {
            out.push('(');
            write_coordinate(out, value, len)?;
            out.push(')');
            Ok(())
        }
        GeometryType::LineString => write_points(out, value, len, "LineString"),
        GeometryType::Polygon => write_rings(out, value, len),
        GeometryType::MultiPoint => write_list(out, value, "MultiPoint", |out, point| {
            out.push('(');
            write_coordinate(out, point, len)?;
            out.push(')');
            Ok(())
        }),
        GeometryType::MultiLineString => write_list(out, value, "MultiLineString", |out, line| {
            write_points(out, line, len, "LineString")
        }),
        GeometryType::MultiPolygon => write_list(out, value, "MultiPolygon", |out, polygon| {
            write_rings(out, polygon, len)
        }),
        GeometryType::GeometryCollection => {
            write_list(out, value, "GeometryCollection", |out, member| {
                let member = collection_member(member, depth + 1)?;
                write_tagged(out, member.kind, member.dimension, &member.value, depth + 1)
            })
        }
        _ => Err(Error::UnsupportedType(kind.name().to_string())),
    }
}

/// Writes `(a,b,...)` with `write_item` producing each element.
fn write_list<F>(out: &mut String, value: &Value, owner: &str, mut write_item: F) -> Result<()>
where
    F: FnMut(&mut String, &Value) -> Result<()>,
{
    out.push('(');
    for (i, item) in elements(value, owner)?.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_item(out, item)?;
    }
    out.push(')');
    Ok(())
}

fn write_points(out: &mut String, value: &Value, len: usize, owner: &str) -> Result<()> {
    write_list(out, value, owner, |out, point| write_coordinate(out, point, len))
}

fn write_rings(out: &mut String, value: &Value, len: usize) -> Result<()> {
    write_list(out, value, "Polygon", |out, ring| write_points(out, ring, len, "Ring"))
}

fn write_coordinate(out: &mut String, value: &Value, len: usize) -> Result<()> {
    for (i, ordinate) in read_coordinate(value, len)?.as_slice().iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&ordinate.to_string());
    }
    Ok(())
}
