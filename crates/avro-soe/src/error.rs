//! Error types for envelope construction and decoding.

use thiserror::Error;

use crate::header::Fingerprint;

/// Boxed error used at the pluggable seams (fingerprinter, registry backend).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias defaulting to [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by [`Codec`](crate::Codec), [`TypedCodec`](crate::TypedCodec)
/// and [`DynamicCodec`](crate::DynamicCodec).
#[derive(Debug, Error)]
pub enum Error {
    /// The fingerprinter failed for the bound schema.
    #[error("compute fingerprint: {0}")]
    Fingerprint(#[source] BoxError),
    /// The fingerprinter produced a digest that is not 8 bytes long.
    #[error("bad fingerprint length: {len} bytes {bytes:?}", len = .bytes.len())]
    FingerprintLength { bytes: Vec<u8> },
    /// The envelope is shorter than the 10-byte header.
    #[error("message too short: {data:?}")]
    TooShort { data: Vec<u8> },
    /// The first two bytes are not the single object magic.
    #[error("bad message magic: {magic:?}")]
    BadMagic { magic: [u8; 2] },
    /// Strict decoding found a fingerprint other than the codec's own.
    #[error("bad schema: {fingerprint}")]
    SchemaMismatch { fingerprint: Fingerprint },
    /// The registry could not resolve the embedded fingerprint.
    #[error("schema lookup for {fingerprint}: {source}")]
    SchemaLookup {
        fingerprint: Fingerprint,
        #[source]
        source: RegistryError,
    },
    #[error("marshal: {0}")]
    Marshal(#[source] SerializerError),
    #[error("unmarshal: {0}")]
    Unmarshal(#[source] SerializerError),
}

/// Fieldless discriminant of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Fingerprint,
    TooShort,
    BadMagic,
    SchemaMismatch,
    SchemaLookup,
    Serializer,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Fingerprint(_) | Error::FingerprintLength { .. } => ErrorKind::Fingerprint,
            Error::TooShort { .. } => ErrorKind::TooShort,
            Error::BadMagic { .. } => ErrorKind::BadMagic,
            Error::SchemaMismatch { .. } => ErrorKind::SchemaMismatch,
            Error::SchemaLookup { .. } => ErrorKind::SchemaLookup,
            Error::Marshal(_) | Error::Unmarshal(_) => ErrorKind::Serializer,
        }
    }
}

/// Errors reported by a [`Serializer`](crate::Serializer).
#[derive(Debug, Error)]
pub enum SerializerError {
    #[error(transparent)]
    Avro(#[from] apache_avro::Error),
    #[error("payload of {len} bytes exceeds limit of {max} bytes")]
    PayloadTooLarge { len: usize, max: usize },
    #[error("{remaining} trailing bytes after datum")]
    TrailingBytes { remaining: usize },
    /// The decoded value does not conform to the schema, e.g. a datum cut off
    /// inside a string that the engine read back as null.
    #[error("decoded datum does not match schema")]
    InvalidDatum,
}

/// Errors reported by a [`SchemaRegistry`](crate::SchemaRegistry).
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no schema registered for key {key:#018x}")]
    NotFound { key: u64 },
    #[error("registry backend: {0}")]
    Backend(#[source] BoxError),
}

impl RegistryError {
    /// Wraps an arbitrary backend failure (network, storage, ...).
    pub fn backend<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        RegistryError::Backend(err.into())
    }
}
