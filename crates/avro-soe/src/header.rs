//! Single object envelope header.
//!
//! Wire layout:
//!
//! ```text
//! offset 0..2    magic, 0xC3 0x01
//! offset 2..10   schema fingerprint, 8 bytes as emitted by the fingerprinter
//! offset 10..    schema-encoded datum
//! ```
//!
//! There is no length field; the datum encoding is self-terminating.

use std::fmt;

use crate::error::{Error, Result};

/// Single object encoding marker.
pub const MAGIC: [u8; 2] = [0xC3, 0x01];

/// Length of a schema fingerprint on the wire.
pub const FINGERPRINT_LEN: usize = 8;

/// Length of the full header (magic + fingerprint).
pub const HEADER_LEN: usize = MAGIC.len() + FINGERPRINT_LEN;

/// 8-byte schema fingerprint.
///
/// The raw bytes are what travels on the wire and what strict decoding
/// compares. Registries are keyed by [`Fingerprint::to_u64`], which reads the
/// same bytes as a little-endian integer. Both forms are kept so that the byte
/// order of the key never depends on the platform.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    pub const fn from_bytes(bytes: [u8; FINGERPRINT_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns `None` unless `bytes` is exactly 8 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; FINGERPRINT_LEN]>::try_from(bytes).ok().map(Self)
    }

    /// Inverse of [`Fingerprint::to_u64`].
    pub const fn from_u64(key: u64) -> Self {
        Self(key.to_le_bytes())
    }

    pub const fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.0
    }

    /// Registry key: the wire bytes interpreted as a little-endian `u64`.
    pub const fn to_u64(self) -> u64 {
        u64::from_le_bytes(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({self})")
    }
}

impl From<[u8; FINGERPRINT_LEN]> for Fingerprint {
    fn from(bytes: [u8; FINGERPRINT_LEN]) -> Self {
        Self(bytes)
    }
}

/// Memoized 10-byte envelope header for one schema.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Header([u8; HEADER_LEN]);

impl Header {
    pub fn new(fingerprint: Fingerprint) -> Self {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[..MAGIC.len()].copy_from_slice(&MAGIC);
        bytes[MAGIC.len()..].copy_from_slice(fingerprint.as_bytes());
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; HEADER_LEN] {
        &self.0
    }

    pub fn fingerprint(&self) -> Fingerprint {
        let mut bytes = [0u8; FINGERPRINT_LEN];
        bytes.copy_from_slice(&self.0[MAGIC.len()..]);
        Fingerprint(bytes)
    }

    /// Returns `header ++ datum`.
    pub fn wrap(&self, datum: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + datum.len());
        out.extend_from_slice(&self.0);
        out.extend_from_slice(datum);
        out
    }
}

impl fmt::Debug for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Header")
            .field("magic", &&self.0[..MAGIC.len()])
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

/// Checks length and magic, then splits an envelope into its embedded
/// fingerprint and the datum bytes that follow the header.
///
/// The fingerprint is returned as-is; comparing it or resolving it is up to
/// the caller.
pub fn split_envelope(data: &[u8]) -> Result<(Fingerprint, &[u8])> {
    if data.len() < HEADER_LEN {
        return Err(Error::TooShort {
            data: data.to_vec(),
        });
    }
    let (header, datum) = data.split_at(HEADER_LEN);
    if header[..MAGIC.len()] != MAGIC {
        return Err(Error::BadMagic {
            magic: [header[0], header[1]],
        });
    }
    let mut fingerprint = [0u8; FINGERPRINT_LEN];
    fingerprint.copy_from_slice(&header[MAGIC.len()..]);
    Ok((Fingerprint(fingerprint), datum))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn header_layout() {
        let fp = Fingerprint::from_bytes([1, 2, 3, 4, 5, 6, 7, 8]);
        let header = Header::new(fp);
        assert_eq!(
            header.as_bytes(),
            &[0xC3, 0x01, 1, 2, 3, 4, 5, 6, 7, 8]
        );
        assert_eq!(header.fingerprint(), fp);
        assert_eq!(header.wrap(&[9]), vec![0xC3, 0x01, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn registry_key_is_little_endian() {
        let fp = Fingerprint::from_bytes([0x01, 0, 0, 0, 0, 0, 0, 0x80]);
        assert_eq!(fp.to_u64(), 0x8000_0000_0000_0001);
        assert_eq!(Fingerprint::from_u64(fp.to_u64()), fp);
    }

    #[test]
    fn display_is_wire_order_hex() {
        let fp = Fingerprint::from_bytes([0x94, 0x07, 0xf3, 0x82, 0x96, 0xc8, 0x4b, 0xd2]);
        assert_eq!(fp.to_string(), "9407f38296c84bd2");
        assert_eq!(format!("{fp:?}"), "Fingerprint(9407f38296c84bd2)");
    }

    #[test]
    fn from_slice_requires_exact_length() {
        assert!(Fingerprint::from_slice(&[0; 7]).is_none());
        assert!(Fingerprint::from_slice(&[0; 9]).is_none());
        assert!(Fingerprint::from_slice(&[0; 8]).is_some());
    }

    #[test]
    fn split_accepts_header_only_envelope() {
        let envelope = Header::new(Fingerprint::from_u64(7)).wrap(&[]);
        let (fp, datum) = split_envelope(&envelope).unwrap();
        assert_eq!(fp.to_u64(), 7);
        assert!(datum.is_empty());
    }

    #[test]
    fn split_rejects_short_input_before_magic() {
        let err = split_envelope(&[0x00, 0x00, 0x01]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TooShort);
        assert_eq!(err.to_string(), "message too short: [0, 0, 1]");
    }

    #[test]
    fn split_rejects_bad_magic() {
        let err = split_envelope(&[0xC3, 0x02, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadMagic);
        assert_eq!(err.to_string(), "bad message magic: [195, 2]");
    }
}
