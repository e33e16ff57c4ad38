//! Well-Known Binary encoding.
//!
//! Every record is a byte-order marker, a u32 type word and a body. The
//! type word is the geometry's type code ORed with the dimension and SRID
//! flags the dialect permits; with the SRID flag set the SRID follows the
//! type word as a u32.
//!
//! Multi* and GeometryCollection bodies hold standalone records, each with
//! its own marker. Those records carry dimension flags but never an SRID.

use std::fmt;

use log::debug;
use serde_json::Value;

use crate::codec::primitives::{ByteOrder, Writer};
use crate::codec::{collection_member, elements, read_coordinate, Formatter};
use crate::error::{Error, Result};
use crate::model::{coordinate_len, Dimension, Geometry, GeometryType};

/// Type word flag: coordinates carry a Z ordinate.
pub const WKB_FLAG_Z: u32 = 0x8000_0000;
/// Type word flag: coordinates carry an M ordinate.
pub const WKB_FLAG_M: u32 = 0x4000_0000;
/// Type word flag: an SRID follows the type word.
pub const WKB_FLAG_SRID: u32 = 0x2000_0000;

/// WKB flavour, deciding which type word flags may be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum Dialect {
    /// Plain OGC WKB: 2D, no SRID.
    #[default]
    Ogc = 0x0001,
    /// PostGIS extended WKB: Z, M and SRID flags.
    PostGis = 0x0002,
}

impl Dialect {
    /// Creates a Dialect from its raw value.
    pub fn from_bits(bits: u32) -> Result<Dialect> {
        match bits {
            0x0001 => Ok(Dialect::Ogc),
            0x0002 => Ok(Dialect::PostGis),
            _ => Err(Error::UnexpectedValue(format!("Unsupported WKB dialect {bits}"))),
        }
    }

    /// Type word flags this dialect may write.
    pub fn permitted_flags(self) -> u32 {
        match self {
            Dialect::Ogc => 0,
            Dialect::PostGis => WKB_FLAG_Z | WKB_FLAG_M | WKB_FLAG_SRID,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Ogc => f.write_str("OGC"),
            Dialect::PostGis => f.write_str("PostGIS"),
        }
    }
}

/// WKB encoder for a fixed byte order and dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wkb {
    byte_order: ByteOrder,
    dialect: Dialect,
}

impl Wkb {
    pub fn new(byte_order: ByteOrder, dialect: Dialect) -> Self {
        Self { byte_order, dialect }
    }

    /// Creates an encoder from raw marker and dialect values.
    pub fn from_raw(byte_order: u8, dialect: u32) -> Result<Self> {
        Ok(Self::new(ByteOrder::from_u8(byte_order)?, Dialect::from_bits(dialect)?))
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Encodes `geometry` as a single WKB record.
    pub fn encode(&self, geometry: &Geometry) -> Result<Vec<u8>> {
        debug!(
            "encoding {} as {:?} {} WKB",
            geometry.kind, self.byte_order, self.dialect
        );
        let mut writer = Writer::with_capacity(self.byte_order, 64);
        self.write_record(
            &mut writer,
            geometry.kind,
            geometry.dimension,
            geometry.srid,
            &geometry.value,
            0,
        )?;
        Ok(writer.into_bytes())
    }

    /// Computes the type word flags, failing on flags the dialect forbids.
    pub fn type_flags(&self, dimension: Option<Dimension>, srid: Option<u32>) -> Result<u32> {
        let mut flags = 0;
        if dimension.is_some_and(Dimension::has_z) {
            flags |= WKB_FLAG_Z;
        }
        if dimension.is_some_and(Dimension::has_m) {
            flags |= WKB_FLAG_M;
        }
        if srid.is_some() {
            flags |= WKB_FLAG_SRID;
        }

        let forbidden = flags & !self.dialect.permitted_flags();
        if forbidden != 0 {
            return Err(Error::UnexpectedValue(format!(
                "Unsupported flags 0x{forbidden:08X} for {} WKB",
                self.dialect
            )));
        }
        Ok(flags)
    }

    fn write_record(
        &self,
        writer: &mut Writer,
        kind: GeometryType,
        dimension: Option<Dimension>,
        srid: Option<u32>,
        value: &Value,
        depth: usize,
    ) -> Result<()> {
        let flags = self.type_flags(dimension, srid)?;
        writer.write_byte_order();
        writer.write_u32(kind.code() | flags);
        if let Some(srid) = srid {
            writer.write_u32(srid);
        }

        let len = coordinate_len(dimension);
        match kind {
            GeometryType::Point => write_coordinate(writer, value, len),
            GeometryType::LineString => write_points(writer, value, len, "LineString"),
            GeometryType::Polygon => write_rings(writer, value, len),
            GeometryType::MultiPoint => {
                self.write_members(writer, value, GeometryType::Point, dimension, depth)
            }
            GeometryType::MultiLineString => {
                self.write_members(writer, value, GeometryType::LineString, dimension, depth)
            }
            GeometryType::MultiPolygon => {
                self.write_members(writer, value, GeometryType::Polygon, dimension, depth)
            }
            GeometryType::GeometryCollection => self.write_collection(writer, value, depth),
            _ => Err(Error::UnsupportedType(kind.name().to_string())),
        }
    }

    fn write_members(
        &self,
        writer: &mut Writer,
        value: &Value,
        member_kind: GeometryType,
        dimension: Option<Dimension>,
        depth: usize,
    ) -> Result<()> {
        let members = elements(value, &format!("Multi{member_kind}"))?;
        writer.write_count(members.len())?;
        for member in members {
            self.write_record(writer, member_kind, dimension, None, member, depth + 1)?;
        }
        Ok(())
    }

    fn write_collection(&self, writer: &mut Writer, value: &Value, depth: usize) -> Result<()> {
        let members = elements(value, "GeometryCollection")?;
        writer.write_count(members.len())?;
        for member in members {
            let member = collection_member(member, depth + 1)?;
            self.write_record(
                writer,
                member.kind,
                member.dimension,
                None,
                &member.value,
                depth + 1,
            )?;
        }
        Ok(())
    }
}

impl Formatter for Wkb {
    type Output = Vec<u8>;

    fn format(&self, geometry: &Geometry) -> Result<Vec<u8>> {
        self.encode(geometry)
    }
}

fn write_coordinate(writer: &mut Writer, value: &Value, len: usize) -> Result<()> {
    for &ordinate in read_coordinate(value, len)?.as_slice() {
        writer.write_f64(ordinate);
    }
    Ok(())
}

fn write_points(writer: &mut Writer, value: &Value, len: usize, owner: &str) -> Result<()> {
    let points = elements(value, owner)?;
    writer.write_count(points.len())?;
    for point in points {
        write_coordinate(writer, point, len)?;
    }
    Ok(())
}

fn write_rings(writer: &mut Writer, value: &Value, len: usize) -> Result<()> {
    let rings = elements(value, "Polygon")?;
    writer.write_count(rings.len())?;
    for ring in rings {
        write_points(writer, ring, len, "Ring")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::codec::hex::encode_hex;
    use crate::error::ErrorKind;
    use crate::generate::SimpleArray;

    fn normalized(input: Value) -> Geometry {
        SimpleArray.generate(input, None).unwrap()
    }

    fn encode_hex_with(wkb: Wkb, input: Value) -> String {
        encode_hex(&wkb.encode(&normalized(input)).unwrap())
    }

    #[test]
    fn test_point() {
        let hex = encode_hex_with(Wkb::default(), json!({"type": "Point", "value": [0, 0]}));
        assert_eq!(hex, "000000000100000000000000000000000000000000");
    }

    #[test]
    fn test_point_z_postgis() {
        let wkb = Wkb::new(ByteOrder::Xdr, Dialect::PostGis);
        let hex = encode_hex_with(wkb, json!({"type": "Point", "value": [0, 0, 0]}));
        assert_eq!(hex, "0080000001000000000000000000000000000000000000000000000000");
    }

    #[test]
    fn test_point_z_with_srid() {
        let wkb = Wkb::new(ByteOrder::Xdr, Dialect::PostGis);
        let hex = encode_hex_with(
            wkb,
            json!({"type": "POINTZ", "value": [1, 2, 3], "srid": 4326}),
        );
        assert_eq!(
            hex,
            "00A0000001000010E63FF000000000000040000000000000004008000000000000"
        );
    }

    #[test]
    fn test_point_m_both_orders() {
        let input = json!({"type": "POINTM", "value": [1, 2, 3]});

        let hex = encode_hex_with(Wkb::new(ByteOrder::Xdr, Dialect::PostGis), input.clone());
        assert_eq!(
            hex,
            "00400000013FF000000000000040000000000000004008000000000000"
        );

        let hex = encode_hex_with(Wkb::new(ByteOrder::Ndr, Dialect::PostGis), input);
        assert_eq!(
            hex,
            "0101000040000000000000F03F00000000000000400000000000000840"
        );
    }

    #[test]
    fn test_point_zm() {
        let wkb = Wkb::new(ByteOrder::Xdr, Dialect::PostGis);
        let hex = encode_hex_with(wkb, json!({"type": "POINTZM", "value": [1, 2, 3, 4]}));
        assert_eq!(
            hex,
            "00C00000013FF0000000000000400000000000000040080000000000004010000000000000"
        );
    }

    #[test]
    fn test_point_zm_with_srid_both_orders() {
        let input = json!({"type": "Point ZM", "value": [1, 2, 3, 4], "srid": 4326});

        let hex = encode_hex_with(Wkb::new(ByteOrder::Xdr, Dialect::PostGis), input.clone());
        assert_eq!(
            hex,
            "00E0000001000010E63FF0000000000000400000000000000040080000000000004010000000000000"
        );

        let hex = encode_hex_with(Wkb::new(ByteOrder::Ndr, Dialect::PostGis), input);
        assert_eq!(
            hex,
            "01010000E0E6100000000000000000F03F000000000000004000000000000008400000000000001040"
        );
    }

    #[test]
    fn test_collection_keeps_member_m_dimension() {
        let wkb = Wkb::new(ByteOrder::Xdr, Dialect::PostGis);
        let hex = encode_hex_with(
            wkb,
            json!({"type": "GeometryCollection", "value": [
                {"type": "POINTM", "value": [1, 2, 3]}
            ]}),
        );
        assert_eq!(
            hex,
            "004000000700000001\
             00400000013FF000000000000040000000000000004008000000000000"
        );
    }

    #[test]
    fn test_line_string() {
        let hex = encode_hex_with(
            Wkb::default(),
            json!({"type": "LineString", "value": [[34.23, -87], [45.3, -92]]}),
        );
        assert_eq!(
            hex,
            "00000000020000000240411D70A3D70A3DC055C000000000004046A66666666666C057000000000000"
        );
    }

    #[test]
    fn test_polygon() {
        let hex = encode_hex_with(
            Wkb::default(),
            json!({"type": "Polygon", "value": [[[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]]]}),
        );
        assert_eq!(
            hex,
            "000000000300000001000000050000000000000000000000000000000040240000000000000000000000000000402400000000000040240000000000000000000000000000402400000000000000000000000000000000000000000000"
        );
    }

    #[test]
    fn test_multi_point() {
        let hex = encode_hex_with(
            Wkb::default(),
            json!({"type": "MultiPoint", "value": [[0, 0], [10, 0], [10, 10], [0, 10]]}),
        );
        assert_eq!(
            hex,
            "000000000400000004000000000100000000000000000000000000000000000000000140240000000000000000000000000000000000000140240000000000004024000000000000000000000100000000000000004024000000000000"
        );
    }

    #[test]
    fn test_multi_line_string_ndr() {
        let wkb = Wkb::new(ByteOrder::Ndr, Dialect::Ogc);
        let hex = encode_hex_with(
            wkb,
            json!({"type": "MultiLineString", "value": [
                [[0, 0], [10, 0], [10, 10], [0, 10]],
                [[5, 5], [7, 5], [7, 7], [5, 7]]
            ]}),
        );
        assert_eq!(
            hex,
            "01050000000200000001020000000400000000000000000000000000000000000000000000000000244000000000000000000000000000002440000000000000244000000000000000000000000000002440010200000004000000000000000000144000000000000014400000000000001C4000000000000014400000000000001C400000000000001C4000000000000014400000000000001C40"
        );
    }

    #[test]
    fn test_multi_polygon() {
        let hex = encode_hex_with(
            Wkb::default(),
            json!({"type": "MultiPolygon", "value": [
                [
                    [[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]],
                    [[5, 5], [7, 5], [7, 7], [5, 7], [5, 5]]
                ],
                [
                    [[1, 1], [3, 1], [3, 3], [1, 3], [1, 1]]
                ]
            ]}),
        );
        assert_eq!(
            hex,
            "0000000006000000020000000003000000020000000500000000000000000000000000000000402400000000000000000000000000004024000000000000402400000000000000000000000000004024000000000000000000000000000000000000000000000000000540140000000000004014000000000000401C0000000000004014000000000000401C000000000000401C0000000000004014000000000000401C00000000000040140000000000004014000000000000000000000300000001000000053FF00000000000003FF000000000000040080000000000003FF0000000000000400800000000000040080000000000003FF000000000000040080000000000003FF00000000000003FF0000000000000"
        );
    }

    #[test]
    fn test_multi_members_keep_dimension_but_not_srid() {
        let wkb = Wkb::new(ByteOrder::Xdr, Dialect::PostGis);
        let hex = encode_hex_with(
            wkb,
            json!({"type": "MultiPoint", "value": [[1, 2, 3]], "srid": 4326}),
        );
        assert_eq!(
            hex,
            "00A0000004000010E60000000100800000013FF000000000000040000000000000004008000000000000"
        );
    }

    #[test]
    fn test_geometry_collection() {
        let hex = encode_hex_with(
            Wkb::default(),
            json!({"type": "GeometryCollection", "value": [
                {"type": "Point", "value": [0, 0]},
                {"type": "LineString", "value": [[34.23, -87], [45.3, -92]]}
            ]}),
        );
        assert_eq!(
            hex,
            "000000000700000002\
             000000000100000000000000000000000000000000\
             00000000020000000240411D70A3D70A3DC055C000000000004046A66666666666C057000000000000"
        );
    }

    #[test]
    fn test_ogc_rejects_extended_flags() {
        let err = Wkb::default()
            .encode(&normalized(json!({"type": "Point", "value": [0, 0, 0]})))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedValue);

        let err = Wkb::default()
            .encode(&normalized(json!({"type": "Point", "value": [0, 0], "srid": 4326})))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedValue);
    }

    #[test]
    fn test_unsupported_kind() {
        let geometry = Geometry::new(GeometryType::Triangle, json!([]));
        let err = Wkb::default().encode(&geometry).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
        assert_eq!(err.to_string(), "Unsupported type \"Triangle\"");
    }

    #[test]
    fn test_malformed_payloads() {
        for geometry in [
            Geometry::new(GeometryType::Point, json!([1])),
            Geometry::new(GeometryType::Point, json!([1, "a"])),
            Geometry::new(GeometryType::LineString, json!({"a": 1})),
            Geometry::new(GeometryType::Polygon, json!([[1, 2]])),
            Geometry::new(GeometryType::MultiPoint, json!(5)),
            Geometry::new(GeometryType::GeometryCollection, json!([[0, 0]])),
        ] {
            let err = Wkb::default().encode(&geometry).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnexpectedValue, "{geometry:?}");
        }
    }

    #[test]
    fn test_bad_construction() {
        let err = Wkb::from_raw(5, Dialect::Ogc as u32).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedValue);

        let err = Wkb::from_raw(0, 56).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedValue);

        let wkb = Wkb::from_raw(1, 2).unwrap();
        assert_eq!(wkb, Wkb::new(ByteOrder::Ndr, Dialect::PostGis));
    }

    /// Rewrites an XDR LineString record into its NDR form by flipping the
    /// marker and reversing every multi-byte field.
    fn xdr_line_string_to_ndr(xdr: &[u8]) -> Vec<u8> {
        let mut ndr = vec![1];
        for field in xdr[1..9].chunks(4) {
            ndr.extend(field.iter().rev());
        }
        for field in xdr[9..].chunks(8) {
            ndr.extend(field.iter().rev());
        }
        ndr
    }

    proptest! {
        #[test]
        fn prop_byte_orders_are_mirror_images(
            points in prop::collection::vec((-1.0e9f64..1.0e9, -1.0e9f64..1.0e9), 0..16),
        ) {
            let value: Vec<Value> = points.iter().map(|(x, y)| json!([x, y])).collect();
            let geometry = Geometry::new(GeometryType::LineString, Value::Array(value));

            let xdr = Wkb::new(ByteOrder::Xdr, Dialect::Ogc).encode(&geometry).unwrap();
            let ndr = Wkb::new(ByteOrder::Ndr, Dialect::Ogc).encode(&geometry).unwrap();

            prop_assert_eq!(xdr.len(), 9 + 16 * points.len());
            prop_assert_eq!(xdr_line_string_to_ndr(&xdr), ndr);
        }
    }
}
