//! Type registry: maps geometry kinds to their validators.
//!
//! The registry is an ordinary value. Callers build one (usually with
//! [`Registry::with_defaults`]) and pass it by reference to generators,
//! validators and formatters. Registering a validator for a kind is the
//! only step needed to make that kind validatable; composite validators
//! resolve their element validators through the registry at call time.
//!
//! [`Registry::global`] offers a lazily-built, read-only default registry
//! shared by the whole process.

use lazy_static::lazy_static;
use log::debug;
use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::model::GeometryType;
use crate::validate::{
    GeometryCollectionValidator, LineStringValidator, MultiLineStringValidator,
    MultiPointValidator, MultiPolygonValidator, PointValidator, PolygonValidator, Validator,
};

lazy_static! {
    static ref GLOBAL: Registry = Registry::with_defaults();
}

/// Mapping from geometry kind to validator.
#[derive(Debug, Default)]
pub struct Registry {
    validators: FxHashMap<GeometryType, Box<dyn Validator>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in validators.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.insert(Box::new(PointValidator));
        registry.insert(Box::new(LineStringValidator));
        registry.insert(Box::new(PolygonValidator));
        registry.insert(Box::new(MultiPointValidator));
        registry.insert(Box::new(MultiLineStringValidator));
        registry.insert(Box::new(MultiPolygonValidator));
        registry.insert(Box::new(GeometryCollectionValidator));
        registry
    }

    /// Returns the process-wide default registry, building it on first use.
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Resolves a type name (any case) to its kind.
    pub fn resolve_type(type_name: &str) -> Result<GeometryType> {
        type_name.trim().parse()
    }

    /// Returns the canonical capitalization of a type name.
    pub fn canonical_name(type_name: &str) -> Result<&'static str> {
        Self::resolve_type(type_name).map(GeometryType::name)
    }

    /// Registers `validator` for the kind named `type_name`, replacing any
    /// previous one.
    ///
    /// Fails with [`Error::UnsupportedType`] if the name is not a geometry
    /// kind.
    pub fn register(&mut self, type_name: &str, validator: Box<dyn Validator>) -> Result<()> {
        let kind = Self::resolve_type(type_name)?;
        debug!("registering validator for {kind}");
        self.validators.insert(kind, validator);
        Ok(())
    }

    /// Returns the validator registered for `type_name`.
    ///
    /// `Ok(None)` means the kind exists but nothing is registered for it;
    /// an unknown name is an [`Error::UnsupportedType`].
    pub fn lookup(&self, type_name: &str) -> Result<Option<&dyn Validator>> {
        let kind = Self::resolve_type(type_name)?;
        Ok(self.get(kind))
    }

    /// Returns the validator registered for `kind`, if any.
    pub fn get(&self, kind: GeometryType) -> Option<&dyn Validator> {
        self.validators.get(&kind).map(|v| v.as_ref())
    }

    /// Like [`Registry::get`], but a missing validator is an error.
    pub fn require(&self, kind: GeometryType) -> Result<&dyn Validator> {
        self.get(kind)
            .ok_or_else(|| Error::UnsupportedType(kind.name().to_string()))
    }

    /// Number of registered validators.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Returns true if no validator is registered.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    fn insert(&mut self, validator: Box<dyn Validator>) {
        self.validators.insert(validator.expected_type(), validator);
    }
}
