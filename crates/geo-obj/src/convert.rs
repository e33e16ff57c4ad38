//! End-to-end conversion: generate, validate, format.
//!
//! Input formats are `"simple"` (JSON text of a bare array or a
//! `{type, value}` object) and `"geojson"`. Output formats are `"wkb"`,
//! `"wkt"` and `"simple"` (the canonical geometry as JSON).

use log::debug;
use serde_json::Value;

use crate::codec::hex::encode_hex;
use crate::codec::{Formatter, Wkb, Wkt};
use crate::error::{Error, Result};
use crate::generate::{GeoJson, SimpleArray};
use crate::model::Geometry;
use crate::registry::Registry;
use crate::validate::validate_geometry;

/// Output of [`Converter::write`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encoded {
    Bytes(Vec<u8>),
    Text(String),
}

impl Encoded {
    /// Renders the output as text, hex-encoding binary output.
    pub fn to_text(&self) -> String {
        match self {
            Encoded::Bytes(bytes) => encode_hex(bytes),
            Encoded::Text(text) => text.clone(),
        }
    }
}

/// Runs inputs through normalization, validation and formatting with one
/// registry and one encoder configuration.
#[derive(Debug)]
pub struct Converter {
    registry: Registry,
    wkb: Wkb,
    wkt: Wkt,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(Registry::with_defaults())
    }
}

impl Converter {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            wkb: Wkb::default(),
            wkt: Wkt::default(),
        }
    }

    /// Replaces the encoders used for `"wkb"` and `"wkt"` output.
    pub fn with_encoders(mut self, wkb: Wkb, wkt: Wkt) -> Self {
        self.wkb = wkb;
        self.wkt = wkt;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Normalizes text in the named input format.
    pub fn read(&self, format: &str, input: &str, type_hint: Option<&str>) -> Result<Geometry> {
        match format.to_ascii_lowercase().as_str() {
            "simple" => {
                let value: Value = serde_json::from_str(input)
                    .map_err(|e| Error::UnsupportedFormat(e.to_string()))?;
                SimpleArray.generate(value, type_hint)
            }
            "geojson" => GeoJson.generate(input, type_hint),
            _ => Err(Error::UnsupportedFormat(format.to_string())),
        }
    }

    /// Validates `geometry` against this converter's registry.
    pub fn validate(&self, geometry: &mut Geometry) -> Result<()> {
        validate_geometry(geometry, &self.registry)
    }

    /// Formats `geometry` in the named output format.
    pub fn write(&self, geometry: &Geometry, format: &str) -> Result<Encoded> {
        match format.to_ascii_lowercase().as_str() {
            "wkb" => self.wkb.format(geometry).map(Encoded::Bytes),
            "wkt" => self.wkt.format(geometry).map(Encoded::Text),
            "simple" => serde_json::to_string(geometry)
                .map(Encoded::Text)
                .map_err(|e| Error::UnexpectedValue(e.to_string())),
            _ => Err(Error::UnsupportedFormat(format.to_string())),
        }
    }

    /// Reads `input` as `from`, validates it and writes it as `to`.
    pub fn convert(
        &self,
        input: &str,
        from: &str,
        to: &str,
        type_hint: Option<&str>,
    ) -> Result<Encoded> {
        let mut geometry = self.read(from, input, type_hint)?;
        self.validate(&mut geometry)?;
        debug!("converting {} from {from} to {to}", geometry.kind);
        self.write(&geometry, to)
    }
}
