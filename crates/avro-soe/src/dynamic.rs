//! Registry-resolved decoding.

use std::sync::Arc;

use apache_avro::types::Value;
use apache_avro::Schema;
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::codec::{from_value, log_rejected};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::header::{split_envelope, Fingerprint};
use crate::registry::SchemaRegistry;
use crate::serializer::{Api, Serializer};

/// Decodes envelopes whose schema is only known from the embedded
/// fingerprint, by asking a [`SchemaRegistry`].
///
/// Decode only: producing an envelope always needs a statically bound
/// [`Codec`](crate::Codec).
#[derive(Debug, Clone)]
pub struct DynamicCodec<R, S = Api> {
    serializer: S,
    registry: R,
}

impl<R: SchemaRegistry> DynamicCodec<R> {
    pub fn new(registry: R) -> Self {
        Self::with_config(registry, Config::default())
    }

    pub fn with_config(registry: R, config: Config) -> Self {
        Self::with_serializer(registry, config.freeze())
    }
}

impl<R: SchemaRegistry, S: Serializer> DynamicCodec<R, S> {
    pub fn with_serializer(registry: R, serializer: S) -> Self {
        Self {
            serializer,
            registry,
        }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Checks length and magic and resolves the embedded fingerprint,
    /// without decoding the datum.
    pub fn resolve(&self, data: &[u8]) -> Result<Arc<Schema>> {
        let (fingerprint, _) = split_envelope(data).inspect_err(log_rejected)?;
        self.lookup(fingerprint)
    }

    pub fn unmarshal<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        let value = self.unmarshal_value(data)?;
        from_value(&value)
    }

    pub fn unmarshal_value(&self, data: &[u8]) -> Result<Value> {
        let (fingerprint, datum) = split_envelope(data).inspect_err(log_rejected)?;
        let schema = self.lookup(fingerprint)?;
        self.serializer
            .unmarshal(&schema, datum)
            .map_err(Error::Unmarshal)
    }

    fn lookup(&self, fingerprint: Fingerprint) -> Result<Arc<Schema>> {
        let key = fingerprint.to_u64();
        trace!(%fingerprint, key, "resolving schema");
        self.registry
            .get(key)
            .map_err(|source| Error::SchemaLookup {
                fingerprint,
                source,
            })
            .inspect_err(log_rejected)
    }
}
