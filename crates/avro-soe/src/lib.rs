//! Avro single object encoding.
//!
//! A single object envelope is a 2-byte magic marker (`C3 01`), the 8-byte
//! CRC-64-AVRO fingerprint of the writer schema, and the Avro binary datum:
//!
//! - [`Codec`] binds one schema and memoizes its header; it encodes, decodes,
//!   and optionally checks the embedded fingerprint ([`Codec::unmarshal_strict`]).
//! - [`TypedCodec`] takes the schema from an [`AvroGenerated`] type.
//! - [`DynamicCodec`] decodes envelopes of any schema known to a
//!   [`SchemaRegistry`].
//!
//! Datum encoding and fingerprinting are delegated to `apache-avro`.
//!
//! # Example
//!
//! ```
//! use avro_soe::{avro_generated, DynamicCodec, MemoryRegistry, TypedCodec, MAGIC};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Reading {
//!     sensor: String,
//!     celsius: f64,
//! }
//!
//! avro_generated!(
//!     Reading,
//!     r#"{"type":"record","name":"Reading","fields":[
//!         {"name":"sensor","type":"string"},
//!         {"name":"celsius","type":"double"}]}"#
//! );
//!
//! let codec = TypedCodec::<Reading>::new().unwrap();
//! let reading = Reading { sensor: "north".into(), celsius: 21.5 };
//! let data = codec.marshal(&reading).unwrap();
//! assert_eq!(data[..2], MAGIC);
//! assert_eq!(codec.unmarshal_strict(&data).unwrap(), reading);
//!
//! let mut registry = MemoryRegistry::new();
//! registry.register(codec.codec().schema().clone()).unwrap();
//! let dynamic = DynamicCodec::new(registry);
//! assert_eq!(dynamic.unmarshal::<Reading>(&data).unwrap(), reading);
//! ```

pub mod codec;
pub mod config;
pub mod dynamic;
pub mod error;
pub mod fingerprint;
pub mod generated;
pub mod header;
pub mod registry;
pub mod serializer;
pub mod typed;

pub use apache_avro;

pub use codec::Codec;
pub use config::Config;
pub use dynamic::DynamicCodec;
pub use error::{BoxError, Error, ErrorKind, RegistryError, Result, SerializerError};
pub use fingerprint::{
    compute_fingerprint, compute_fingerprint_using, Crc64Avro, Fingerprinter,
};
pub use generated::{schema_of, AvroGenerated};
pub use header::{split_envelope, Fingerprint, Header, FINGERPRINT_LEN, HEADER_LEN, MAGIC};
pub use registry::{MemoryRegistry, SchemaRegistry};
pub use serializer::{Api, Serializer};
pub use typed::TypedCodec;
