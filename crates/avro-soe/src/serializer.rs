//! Datum serializer seam.
//!
//! The envelope codecs never encode datums themselves; they hand the bound
//! (or resolved) schema and the datum bytes to a [`Serializer`].

use std::sync::Arc;

use apache_avro::types::Value;
use apache_avro::Schema;

use crate::config::Config;
use crate::error::SerializerError;

/// Schema-driven datum encoding.
pub trait Serializer {
    fn marshal(&self, schema: &Schema, value: Value) -> Result<Vec<u8>, SerializerError>;

    fn unmarshal(&self, schema: &Schema, datum: &[u8]) -> Result<Value, SerializerError>;
}

impl<S: Serializer + ?Sized> Serializer for &S {
    fn marshal(&self, schema: &Schema, value: Value) -> Result<Vec<u8>, SerializerError> {
        (**self).marshal(schema, value)
    }

    fn unmarshal(&self, schema: &Schema, datum: &[u8]) -> Result<Value, SerializerError> {
        (**self).unmarshal(schema, datum)
    }
}

impl<S: Serializer + ?Sized> Serializer for Arc<S> {
    fn marshal(&self, schema: &Schema, value: Value) -> Result<Vec<u8>, SerializerError> {
        (**self).marshal(schema, value)
    }

    fn unmarshal(&self, schema: &Schema, datum: &[u8]) -> Result<Value, SerializerError> {
        (**self).unmarshal(schema, datum)
    }
}

/// Frozen `apache-avro` binary serializer. Built by [`Config::freeze`].
#[derive(Debug, Clone, Default)]
pub struct Api {
    config: Config,
}

impl Api {
    pub(crate) fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Serializer for Api {
    fn marshal(&self, schema: &Schema, value: Value) -> Result<Vec<u8>, SerializerError> {
        // serde output is untagged: `Option` fields arrive as bare values and
        // must be mapped onto their union branch before encoding.
        let value = value.resolve(schema)?;
        Ok(apache_avro::to_avro_datum(schema, value)?)
    }

    fn unmarshal(&self, schema: &Schema, datum: &[u8]) -> Result<Value, SerializerError> {
        if let Some(max) = self.config.max_payload_len {
            if datum.len() > max {
                return Err(SerializerError::PayloadTooLarge {
                    len: datum.len(),
                    max,
                });
            }
        }
        let mut reader = datum;
        let value = read_datum(schema, &mut reader)?;
        if !self.config.allow_trailing_bytes && !reader.is_empty() {
            return Err(SerializerError::TrailingBytes {
                remaining: reader.len(),
            });
        }
        Ok(value)
    }
}

/// Decodes one datum from the front of `reader`, advancing it.
///
/// `from_avro_datum` reports some truncated reads as `Value::Null` instead of
/// an error, so the result is checked against the schema before it is
/// returned.
pub(crate) fn read_datum(schema: &Schema, reader: &mut &[u8]) -> Result<Value, SerializerError> {
    let value = apache_avro::from_avro_datum(schema, reader, None)?;
    if !value.validate(schema) {
        return Err(SerializerError::InvalidDatum);
    }
    Ok(value)
}
