//! geo-obj: geometry normalization, validation and WKB/WKT encoding.
//!
//! This crate turns loosely-typed geometry input into a canonical
//! [`Geometry`], checks its structure against a [`Registry`] of
//! per-kind validators, and serializes it as Well-Known Binary or
//! Well-Known Text.
//!
//! # Quick Start
//!
//! ```rust
//! use geo_obj::{ByteOrder, Dialect, Registry, SimpleArray, Wkb, validate_geometry};
//! use geo_obj::codec::encode_hex;
//! use serde_json::json;
//!
//! let mut geometry = SimpleArray
//!     .generate(json!({"type": "POINTZ", "value": [1, 2, 3], "srid": 4326}), None)
//!     .unwrap();
//! validate_geometry(&mut geometry, Registry::global()).unwrap();
//!
//! let wkb = Wkb::new(ByteOrder::Xdr, Dialect::PostGis);
//! let bytes = wkb.encode(&geometry).unwrap();
//! assert_eq!(
//!     encode_hex(&bytes),
//!     "00A0000001000010E63FF000000000000040000000000000004008000000000000"
//! );
//! ```
//!
//! # Modules
//!
//! - [`model`]: Geometry kinds, dimensions and the canonical value
//! - [`generate`]: Input normalizers (plain arrays, GeoJSON)
//! - [`validate`]: Structural validators
//! - [`registry`]: Type-name resolution and validator lookup
//! - [`codec`]: WKB and WKT output
//! - [`convert`]: End-to-end conversion by format name
//! - [`error`]: Error types
//! - [`limits`]: Structural limits

pub mod codec;
pub mod convert;
pub mod error;
pub mod generate;
pub mod limits;
pub mod model;
pub mod registry;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{ByteOrder, Dialect, Formatter, Wkb, Wkt};
pub use convert::{Converter, Encoded};
pub use error::{Error, ErrorKind, Result};
pub use generate::{GeoJson, Generator, SimpleArray};
pub use model::{Dimension, Geometry, GeometryBuilder, GeometryType};
pub use registry::Registry;
pub use validate::{validate_geometry, Validator};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
