//! Codec options.

use serde::{Deserialize, Serialize};

use crate::serializer::Api;

/// Options for building codecs.
///
/// Deserializable so hosts can keep it next to the rest of their settings:
///
/// ```
/// let config: avro_soe::Config =
///     serde_json::from_str(r#"{"maxPayloadLen": 4096, "allowTrailingBytes": false}"#).unwrap();
/// assert_eq!(config.max_payload_len, Some(4096));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Largest datum (bytes after the header) accepted by unmarshal.
    pub max_payload_len: Option<usize>,
    /// Accept datums that do not consume the whole payload.
    pub allow_trailing_bytes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_payload_len: None,
            allow_trailing_bytes: true,
        }
    }
}

impl Config {
    /// Freezes the serializer options into an immutable [`Api`].
    pub fn freeze(self) -> Api {
        Api::new(self)
    }
}
