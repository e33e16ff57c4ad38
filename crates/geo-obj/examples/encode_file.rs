//! Simple encoder to inspect geometry files.
//!
//! Reads a JSON geometry (a `{type, value}` object or GeoJSON) and prints
//! its canonical form, WKB hex in both byte orders and WKT.

use std::fs;

use geo_obj::codec::encode_hex;
use geo_obj::{
    ByteOrder, Dialect, GeoJson, Geometry, Registry, SimpleArray, Wkb, Wkt, validate_geometry,
};

fn read_geometry(text: &str) -> geo_obj::Result<Geometry> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| geo_obj::Error::UnsupportedFormat(e.to_string()))?;
    let is_geojson = ["coordinates", "geometries", "geometry"]
        .iter()
        .any(|key| value.get(key).is_some());
    if is_geojson {
        GeoJson.generate(text, None)
    } else {
        SimpleArray.generate(value, None)
    }
}

fn main() {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "geometry.json".to_string());

    println!("Reading: {}", path);

    let text = fs::read_to_string(&path).expect("Failed to read file");
    let mut geometry = read_geometry(&text).expect("Failed to normalize");
    validate_geometry(&mut geometry, Registry::global()).expect("Failed to validate");

    println!("\n=== Geometry ===");
    println!("Type: {}", geometry.kind);
    if let Some(dimension) = geometry.dimension {
        println!("Dimension: {}", dimension);
    }
    if let Some(srid) = geometry.srid {
        println!("SRID: {}", srid);
    }
    for (key, value) in &geometry.properties {
        println!("  {} = {}", key, value);
    }

    println!("\n=== WKB ===");
    for order in [ByteOrder::Xdr, ByteOrder::Ndr] {
        match Wkb::new(order, Dialect::PostGis).encode(&geometry) {
            Ok(bytes) => println!("{:?} ({} bytes): {}", order, bytes.len(), encode_hex(&bytes)),
            Err(e) => println!("{:?}: [{}] {}", order, e.kind().code(), e),
        }
    }

    println!("\n=== WKT ===");
    match Wkt::extended().to_wkt(&geometry) {
        Ok(text) => println!("{}", text),
        Err(e) => println!("[{}] {}", e.kind().code(), e),
    }
}
