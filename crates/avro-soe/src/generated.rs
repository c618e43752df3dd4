//! Types that carry their own Avro schema.

use apache_avro::Schema;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::SerializerError;
use crate::serializer::read_datum;

/// A value type bound to a schema at the type level.
///
/// [`AvroGenerated::schema`] takes no receiver: the schema belongs to the
/// type, so it can be asked for before any value exists. Implement it by
/// hand or with [`avro_generated!`](crate::avro_generated).
pub trait AvroGenerated: Serialize + DeserializeOwned {
    fn schema() -> &'static Schema;

    /// Bare datum encoding, no envelope.
    fn marshal(&self) -> Result<Vec<u8>, SerializerError> {
        let value = apache_avro::to_value(self)?.resolve(Self::schema())?;
        Ok(apache_avro::to_avro_datum(Self::schema(), value)?)
    }

    /// Inverse of [`AvroGenerated::marshal`].
    fn unmarshal(datum: &[u8]) -> Result<Self, SerializerError> {
        let mut reader = datum;
        let value = read_datum(Self::schema(), &mut reader)?;
        Ok(apache_avro::from_value(&value)?)
    }
}

/// Schema of `T`, without needing a value of `T`.
pub fn schema_of<T: AvroGenerated>() -> &'static Schema {
    T::schema()
}

/// Implements [`AvroGenerated`] for a serde type from a schema literal.
///
/// The schema is parsed on first use and cached for the life of the process.
///
/// # Panics
///
/// On first use, if the literal is not a valid Avro schema.
///
/// ```
/// use avro_soe::{avro_generated, schema_of};
///
/// #[derive(serde::Serialize, serde::Deserialize)]
/// struct Ping {
///     seq: i64,
/// }
///
/// avro_generated!(Ping, r#"{"type":"record","name":"Ping","fields":[{"name":"seq","type":"long"}]}"#);
///
/// assert_eq!(schema_of::<Ping>().canonical_form(), r#"{"name":"Ping","type":"record","fields":[{"name":"seq","type":"long"}]}"#);
/// ```
#[macro_export]
macro_rules! avro_generated {
    ($ty:ty, $schema:expr $(,)?) => {
        impl $crate::AvroGenerated for $ty {
            fn schema() -> &'static $crate::apache_avro::Schema {
                static SCHEMA: ::std::sync::OnceLock<$crate::apache_avro::Schema> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    $crate::apache_avro::Schema::parse_str($schema)
                        .expect(concat!("invalid Avro schema for ", stringify!($ty)))
                })
            }
        }
    };
}
