//! Geometry kinds and coordinate dimensions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Geometry kinds, numbered by their WKB type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum GeometryType {
    Geometry = 0,
    Point = 1,
    LineString = 2,
    Polygon = 3,
    MultiPoint = 4,
    MultiLineString = 5,
    MultiPolygon = 6,
    GeometryCollection = 7,
    CircularString = 8,
    CompoundCurve = 9,
    CurvePolygon = 10,
    MultiCurve = 11,
    MultiSurface = 12,
    Curve = 13,
    Surface = 14,
    PolyhedralSurface = 15,
    Tin = 16,
    Triangle = 17,
}

impl GeometryType {
    /// Every known kind, in type-code order.
    pub const ALL: [GeometryType; 18] = [
        GeometryType::Geometry,
        GeometryType::Point,
        GeometryType::LineString,
        GeometryType::Polygon,
        GeometryType::MultiPoint,
        GeometryType::MultiLineString,
        GeometryType::MultiPolygon,
        GeometryType::GeometryCollection,
        GeometryType::CircularString,
        GeometryType::CompoundCurve,
        GeometryType::CurvePolygon,
        GeometryType::MultiCurve,
        GeometryType::MultiSurface,
        GeometryType::Curve,
        GeometryType::Surface,
        GeometryType::PolyhedralSurface,
        GeometryType::Tin,
        GeometryType::Triangle,
    ];

    /// Creates a GeometryType from its WKB type code.
    pub fn from_code(code: u32) -> Option<GeometryType> {
        Self::ALL.get(code as usize).copied()
    }

    /// Returns the WKB type code.
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Looks up a kind by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<GeometryType> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }

    /// Canonical capitalization, e.g. `"LineString"`.
    pub fn name(self) -> &'static str {
        match self {
            GeometryType::Geometry => "Geometry",
            GeometryType::Point => "Point",
            GeometryType::LineString => "LineString",
            GeometryType::Polygon => "Polygon",
            GeometryType::MultiPoint => "MultiPoint",
            GeometryType::MultiLineString => "MultiLineString",
            GeometryType::MultiPolygon => "MultiPolygon",
            GeometryType::GeometryCollection => "GeometryCollection",
            GeometryType::CircularString => "CircularString",
            GeometryType::CompoundCurve => "CompoundCurve",
            GeometryType::CurvePolygon => "CurvePolygon",
            GeometryType::MultiCurve => "MultiCurve",
            GeometryType::MultiSurface => "MultiSurface",
            GeometryType::Curve => "Curve",
            GeometryType::Surface => "Surface",
            GeometryType::PolyhedralSurface => "PolyhedralSurface",
            GeometryType::Tin => "Tin",
            GeometryType::Triangle => "Triangle",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeometryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeometryType::from_name(s).ok_or_else(|| Error::UnsupportedType(s.to_string()))
    }
}

impl Serialize for GeometryType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for GeometryType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Ordinates carried beyond x and y.
///
/// A geometry without a dimension has plain two-ordinate coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// x, y, z
    #[serde(rename = "Z")]
    Z,
    /// x, y, m
    #[serde(rename = "M")]
    M,
    /// x, y, z, m
    #[serde(rename = "ZM")]
    Zm,
}

impl Dimension {
    /// Parses `"Z"`, `"M"` or `"ZM"`, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Dimension> {
        if name.eq_ignore_ascii_case("z") {
            Some(Dimension::Z)
        } else if name.eq_ignore_ascii_case("m") {
            Some(Dimension::M)
        } else if name.eq_ignore_ascii_case("zm") {
            Some(Dimension::Zm)
        } else {
            None
        }
    }

    /// Maps a coordinate length to the dimension it implies.
    ///
    /// Three ordinates are read as Z; M can only be stated explicitly.
    pub fn from_coordinate_len(len: usize) -> Option<Dimension> {
        match len {
            3 => Some(Dimension::Z),
            4 => Some(Dimension::Zm),
            _ => None,
        }
    }

    /// Upper-case name as used in type suffixes.
    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Z => "Z",
            Dimension::M => "M",
            Dimension::Zm => "ZM",
        }
    }

    /// Number of ordinates in each coordinate.
    pub fn coordinate_len(self) -> usize {
        match self {
            Dimension::Z | Dimension::M => 3,
            Dimension::Zm => 4,
        }
    }

    pub fn has_z(self) -> bool {
        matches!(self, Dimension::Z | Dimension::Zm)
    }

    pub fn has_m(self) -> bool {
        matches!(self, Dimension::M | Dimension::Zm)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of ordinates per coordinate for an optional dimension.
pub fn coordinate_len(dimension: Option<Dimension>) -> usize {
    dimension.map_or(2, Dimension::coordinate_len)
}
