//! Schema fingerprinting.
//!
//! The digest itself is computed by `apache-avro` over the schema's Parsing
//! Canonical Form. This module only enforces that the result fits the 8-byte
//! header slot.

use apache_avro::rabin::Rabin;
use apache_avro::Schema;

use crate::error::{BoxError, Error, Result};
use crate::header::Fingerprint;

/// Produces a digest of a schema.
pub trait Fingerprinter {
    fn fingerprint(&self, schema: &Schema) -> std::result::Result<Vec<u8>, BoxError>;
}

/// CRC-64-AVRO (Rabin) fingerprinter, little-endian output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Crc64Avro;

impl Fingerprinter for Crc64Avro {
    fn fingerprint(&self, schema: &Schema) -> std::result::Result<Vec<u8>, BoxError> {
        Ok(schema.fingerprint::<Rabin>().bytes)
    }
}

impl<F: Fingerprinter + ?Sized> Fingerprinter for &F {
    fn fingerprint(&self, schema: &Schema) -> std::result::Result<Vec<u8>, BoxError> {
        (**self).fingerprint(schema)
    }
}

/// CRC-64-AVRO fingerprint of `schema`.
pub fn compute_fingerprint(schema: &Schema) -> Result<Fingerprint> {
    compute_fingerprint_using(schema, &Crc64Avro)
}

/// Fingerprint of `schema` using an arbitrary fingerprinter.
///
/// # Errors
///
/// [`Error::Fingerprint`] if the fingerprinter fails, and
/// [`Error::FingerprintLength`] if its digest is not exactly 8 bytes. The
/// digest is never truncated or padded.
pub fn compute_fingerprint_using<F>(schema: &Schema, fingerprinter: &F) -> Result<Fingerprint>
where
    F: Fingerprinter + ?Sized,
{
    let digest = fingerprinter
        .fingerprint(schema)
        .map_err(Error::Fingerprint)?;
    match Fingerprint::from_slice(&digest) {
        Some(fingerprint) => Ok(fingerprint),
        None => Err(Error::FingerprintLength { bytes: digest }),
    }
}
