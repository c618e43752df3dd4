//! Fingerprint to schema lookup.

use std::collections::HashMap;
use std::sync::Arc;

use apache_avro::Schema;

use crate::error::{RegistryError, Result};
use crate::fingerprint::compute_fingerprint;
use crate::header::Fingerprint;

/// Resolves a fingerprint key to a schema.
///
/// Keys are the little-endian `u64` form of the header fingerprint (see
/// [`Fingerprint::to_u64`]). Implementations own their own population,
/// caching and synchronization; [`DynamicCodec`](crate::DynamicCodec) only
/// calls [`SchemaRegistry::get`] and never retries.
pub trait SchemaRegistry {
    fn get(&self, fingerprint: u64) -> Result<Arc<Schema>, RegistryError>;
}

impl<R: SchemaRegistry + ?Sized> SchemaRegistry for &R {
    fn get(&self, fingerprint: u64) -> Result<Arc<Schema>, RegistryError> {
        (**self).get(fingerprint)
    }
}

impl<R: SchemaRegistry + ?Sized> SchemaRegistry for Arc<R> {
    fn get(&self, fingerprint: u64) -> Result<Arc<Schema>, RegistryError> {
        (**self).get(fingerprint)
    }
}

impl<R: SchemaRegistry + ?Sized> SchemaRegistry for Box<R> {
    fn get(&self, fingerprint: u64) -> Result<Arc<Schema>, RegistryError> {
        (**self).get(fingerprint)
    }
}

/// In-process registry keyed by CRC-64-AVRO fingerprint.
///
/// Populate it mutably, then share it (`Arc`, `&`) with any number of
/// codecs; lookups take `&self` and need no locking.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    schemas: HashMap<u64, Arc<Schema>>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fingerprints `schema` and registers it, returning the fingerprint.
    /// Registering a schema with the same canonical form again replaces it.
    pub fn register(&mut self, schema: Schema) -> Result<Fingerprint> {
        let fingerprint = compute_fingerprint(&schema)?;
        self.insert(fingerprint, schema);
        Ok(fingerprint)
    }

    /// Registers `schema` under an explicit fingerprint, e.g. one obtained
    /// from an external registry.
    pub fn insert(&mut self, fingerprint: Fingerprint, schema: Schema) -> Option<Arc<Schema>> {
        self.schemas.insert(fingerprint.to_u64(), Arc::new(schema))
    }

    pub fn remove(&mut self, fingerprint: Fingerprint) -> Option<Arc<Schema>> {
        self.schemas.remove(&fingerprint.to_u64())
    }

    pub fn contains(&self, fingerprint: Fingerprint) -> bool {
        self.schemas.contains_key(&fingerprint.to_u64())
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

impl SchemaRegistry for MemoryRegistry {
    fn get(&self, fingerprint: u64) -> Result<Arc<Schema>, RegistryError> {
        self.schemas
            .get(&fingerprint)
            .cloned()
            .ok_or(RegistryError::NotFound { key: fingerprint })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_get() {
        let mut registry = MemoryRegistry::new();
        let schema = Schema::parse_str(r#""int""#).unwrap();
        let fp = registry.register(schema.clone()).unwrap();

        assert_eq!(fp.to_u64(), 8_247_732_601_305_521_295);
        assert!(registry.contains(fp));
        assert_eq!(*registry.get(fp.to_u64()).unwrap(), schema);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_key() {
        let registry = MemoryRegistry::new();
        let err = registry.get(0x10).unwrap_err();
        assert!(matches!(err, RegistryError::NotFound { key: 0x10 }));
        assert_eq!(
            err.to_string(),
            "no schema registered for key 0x0000000000000010"
        );
    }

    #[test]
    fn remove() {
        let mut registry = MemoryRegistry::new();
        let fp = registry
            .register(Schema::parse_str(r#""string""#).unwrap())
            .unwrap();
        assert!(registry.remove(fp).is_some());
        assert!(registry.is_empty());
    }
}
