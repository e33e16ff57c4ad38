//! Benchmark for geo-obj normalization, validation and encoding.
//!
//! Reads a cities JSON file (array of objects with `country_code`,
//! `latitude`, `longitude`) when a path is given, otherwise synthesizes a
//! deterministic dataset. Cities are grouped into one MultiPoint per
//! country plus a closed Polygon ring around each country's bounding box.

use std::collections::BTreeMap;
use std::fs;
use std::time::{Duration, Instant};

use geo_obj::codec::encode_hex;
use geo_obj::{
    ByteOrder, Dialect, Geometry, GeometryBuilder, Registry, SimpleArray, Wkb, Wkt,
    validate_geometry,
};
use log::info;
use serde::Deserialize;

const ITERS: u32 = 10;
const SYNTHETIC_COUNTRIES: usize = 200;
const SYNTHETIC_CITIES_PER_COUNTRY: usize = 750;

// =============================================================================
// INPUT DATA
// =============================================================================

#[derive(Debug, Deserialize)]
struct City {
    country_code: String,
    latitude: String,
    longitude: String,
}

fn load_cities(path: &str) -> Vec<City> {
    let json_data = fs::read_to_string(path).expect("Failed to read cities file");
    serde_json::from_str(&json_data).expect("Failed to parse cities JSON")
}

/// Deterministic pseudo-random coordinates (xorshift).
fn synthesize_cities() -> Vec<City> {
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state % 1_000_000) as f64 / 1_000_000.0
    };

    let mut cities = Vec::with_capacity(SYNTHETIC_COUNTRIES * SYNTHETIC_CITIES_PER_COUNTRY);
    for country in 0..SYNTHETIC_COUNTRIES {
        for _ in 0..SYNTHETIC_CITIES_PER_COUNTRY {
            cities.push(City {
                country_code: format!("C{country:03}"),
                latitude: format!("{:.6}", next() * 180.0 - 90.0),
                longitude: format!("{:.6}", next() * 360.0 - 180.0),
            });
        }
    }
    cities
}

// =============================================================================
// GEOMETRY CONSTRUCTION
// =============================================================================

fn build_geometries(cities: &[City]) -> Vec<Geometry> {
    let mut by_country: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for city in cities {
        if let (Ok(lat), Ok(lon)) = (city.latitude.parse::<f64>(), city.longitude.parse::<f64>()) {
            by_country
                .entry(city.country_code.as_str())
                .or_default()
                .push([lon, lat]);
        }
    }

    let mut geometries = Vec::with_capacity(by_country.len() * 2);
    for (country, points) in by_country {
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (f64::MAX, f64::MAX, f64::MIN, f64::MIN);
        for [x, y] in &points {
            min_x = min_x.min(*x);
            min_y = min_y.min(*y);
            max_x = max_x.max(*x);
            max_y = max_y.max(*y);
        }

        geometries.push(
            GeometryBuilder::polygon([vec![
                [min_x, min_y],
                [max_x, min_y],
                [max_x, max_y],
                [min_x, max_y],
                [min_x, min_y],
            ]])
            .srid(4326)
            .property("country", country)
            .build(),
        );
        geometries.push(
            GeometryBuilder::multi_point(points)
                .srid(4326)
                .property("country", country)
                .build(),
        );
    }
    geometries
}

fn time<T>(label: &str, mut f: impl FnMut() -> T) -> (T, Duration) {
    // Warmup
    for _ in 0..2 {
        let _ = f();
    }

    let start = Instant::now();
    let mut result = f();
    for _ in 1..ITERS {
        result = f();
    }
    let elapsed = start.elapsed() / ITERS;
    println!("{label}: {elapsed:?} (avg of {ITERS} iterations)");
    (result, elapsed)
}

fn main() {
    env_logger::init();

    let cities = match std::env::args().nth(1) {
        Some(path) => {
            info!("loading cities from {path}");
            load_cities(&path)
        }
        None => synthesize_cities(),
    };
    println!("Cities: {}", cities.len());

    let geometries = build_geometries(&cities);
    println!("Geometries: {}", geometries.len());

    // Round the geometries through their JSON form so normalization has
    // real work to do.
    let documents: Vec<serde_json::Value> = geometries
        .iter()
        .map(|g| serde_json::to_value(g).expect("Failed to serialize geometry"))
        .collect();
    let json_size: usize = documents.iter().map(|d| d.to_string().len()).sum();

    println!("\n=== Timings ===");
    let (normalized, normalize_time) = time("Normalize", || {
        documents
            .iter()
            .map(|d| SimpleArray.generate(d.clone(), None).expect("Failed to normalize"))
            .collect::<Vec<_>>()
    });

    let registry = Registry::with_defaults();
    let (validated, validate_time) = time("Validate", || {
        let mut batch = normalized.clone();
        for geometry in &mut batch {
            validate_geometry(geometry, &registry).expect("Failed to validate");
        }
        batch
    });

    let xdr = Wkb::new(ByteOrder::Xdr, Dialect::PostGis);
    let ndr = Wkb::new(ByteOrder::Ndr, Dialect::PostGis);
    let (xdr_bytes, xdr_time) = time("Encode WKB (XDR)", || {
        validated
            .iter()
            .map(|g| xdr.encode(g).expect("Failed to encode").len())
            .sum::<usize>()
    });
    let (ndr_bytes, _) = time("Encode WKB (NDR)", || {
        validated
            .iter()
            .map(|g| ndr.encode(g).expect("Failed to encode").len())
            .sum::<usize>()
    });
    assert_eq!(xdr_bytes, ndr_bytes);

    let wkt = Wkt::extended();
    let (wkt_bytes, _) = time("Format EWKT", || {
        validated
            .iter()
            .map(|g| wkt.to_wkt(g).expect("Failed to format").len())
            .sum::<usize>()
    });

    if let Some(first) = validated.first() {
        let sample = xdr.encode(first).expect("Failed to encode");
        let hex = encode_hex(&sample);
        println!("\nSample EWKB: {}...", &hex[..hex.len().min(64)]);
    }

    println!("\n=== Summary ===");
    println!(
        "JSON size: {} bytes ({:.1} MB)",
        json_size,
        json_size as f64 / 1_000_000.0
    );
    println!(
        "WKB size: {} bytes ({:.1}% of JSON)",
        xdr_bytes,
        100.0 * xdr_bytes as f64 / json_size as f64
    );
    println!(
        "EWKT size: {} bytes ({:.1}% of JSON)",
        wkt_bytes,
        100.0 * wkt_bytes as f64 / json_size as f64
    );
    println!(
        "Pipeline: {:?} per batch",
        normalize_time + validate_time + xdr_time
    );
    println!(
        "  Encode throughput: {:.2} MB/s",
        (xdr_bytes as f64 / 1_000_000.0) / xdr_time.as_secs_f64()
    );
}
