//! Statically bound single object codec.

use apache_avro::types::Value;
use apache_avro::Schema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{Error, Result, SerializerError};
use crate::fingerprint::{compute_fingerprint_using, Crc64Avro, Fingerprinter};
use crate::header::{split_envelope, Fingerprint, Header};
use crate::serializer::{Api, Serializer};

/// Binds one schema to one memoized envelope header.
///
/// The header is computed once at construction and the codec never changes
/// afterwards, so a single instance can be shared across threads.
///
/// There is no check that `T` in [`Codec::marshal`] / [`Codec::unmarshal`]
/// actually matches the bound schema beyond what the serializer validates;
/// [`TypedCodec`](crate::TypedCodec) closes that gap.
#[derive(Debug, Clone)]
pub struct Codec<S = Api> {
    serializer: S,
    schema: Schema,
    header: Header,
}

impl Codec<Api> {
    /// Codec with default options.
    pub fn new(schema: Schema) -> Result<Self> {
        Self::with_config(schema, Config::default())
    }

    pub fn with_config(schema: Schema, config: Config) -> Result<Self> {
        Codec::with_serializer(schema, config.freeze())
    }
}

impl<S: Serializer> Codec<S> {
    /// Codec over a custom serializer, fingerprinted with CRC-64-AVRO.
    pub fn with_serializer(schema: Schema, serializer: S) -> Result<Self> {
        Self::with_fingerprinter(schema, serializer, &Crc64Avro)
    }

    pub fn with_fingerprinter<F>(schema: Schema, serializer: S, fingerprinter: &F) -> Result<Self>
    where
        F: Fingerprinter + ?Sized,
    {
        let fingerprint = compute_fingerprint_using(&schema, fingerprinter)?;
        trace!(%fingerprint, "single object codec bound");
        Ok(Self {
            serializer,
            schema,
            header: Header::new(fingerprint),
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.header.fingerprint()
    }

    pub fn serializer(&self) -> &S {
        &self.serializer
    }

    /// Encodes `value` with the bound schema and prefixes the header.
    pub fn marshal<T>(&self, value: &T) -> Result<Vec<u8>>
    where
        T: Serialize + ?Sized,
    {
        let value = apache_avro::to_value(value)
            .map_err(|err| Error::Marshal(SerializerError::from(err)))?;
        self.marshal_value(value)
    }

    pub fn marshal_value(&self, value: Value) -> Result<Vec<u8>> {
        let datum = self
            .serializer
            .marshal(&self.schema, value)
            .map_err(Error::Marshal)?;
        Ok(self.header.wrap(&datum))
    }

    /// Checks length and magic, then decodes the datum with the bound schema.
    ///
    /// The embedded fingerprint is not compared; use
    /// [`Codec::unmarshal_strict`] when the transport may carry other schemas.
    pub fn unmarshal<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        let value = self.unmarshal_value(data)?;
        from_value(&value)
    }

    pub fn unmarshal_value(&self, data: &[u8]) -> Result<Value> {
        let (_, datum) = split_envelope(data).inspect_err(log_rejected)?;
        self.decode(datum)
    }

    /// Like [`Codec::unmarshal`], but also fails with
    /// [`Error::SchemaMismatch`] unless the embedded fingerprint equals the
    /// codec's own.
    pub fn unmarshal_strict<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T> {
        let value = self.unmarshal_strict_value(data)?;
        from_value(&value)
    }

    pub fn unmarshal_strict_value(&self, data: &[u8]) -> Result<Value> {
        let (fingerprint, datum) = split_envelope(data).inspect_err(log_rejected)?;
        if fingerprint.as_bytes() != self.header.fingerprint().as_bytes() {
            let err = Error::SchemaMismatch { fingerprint };
            log_rejected(&err);
            return Err(err);
        }
        self.decode(datum)
    }

    fn decode(&self, datum: &[u8]) -> Result<Value> {
        self.serializer
            .unmarshal(&self.schema, datum)
            .map_err(Error::Unmarshal)
    }
}

pub(crate) fn from_value<T: DeserializeOwned>(value: &Value) -> Result<T> {
    apache_avro::from_value(value).map_err(|err| Error::Unmarshal(SerializerError::from(err)))
}

pub(crate) fn log_rejected(err: &Error) {
    debug!(kind = ?err.kind(), error = %err, "rejected envelope");
}
