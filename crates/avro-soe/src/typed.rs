//! Codec bound to a generated type.

use std::fmt;
use std::marker::PhantomData;

use crate::codec::Codec;
use crate::config::Config;
use crate::error::Result;
use crate::generated::AvroGenerated;
use crate::header::Fingerprint;
use crate::serializer::{Api, Serializer};

/// [`Codec`] whose schema comes from `T` itself, so a value can never be
/// encoded or decoded with another type's schema.
pub struct TypedCodec<T, S = Api> {
    codec: Codec<S>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: AvroGenerated> TypedCodec<T> {
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self {
            codec: Codec::with_config(T::schema().clone(), config)?,
            _marker: PhantomData,
        })
    }
}

impl<T: AvroGenerated, S: Serializer> TypedCodec<T, S> {
    pub fn with_serializer(serializer: S) -> Result<Self> {
        Ok(Self {
            codec: Codec::with_serializer(T::schema().clone(), serializer)?,
            _marker: PhantomData,
        })
    }

    pub fn marshal(&self, value: &T) -> Result<Vec<u8>> {
        self.codec.marshal(value)
    }

    pub fn unmarshal(&self, data: &[u8]) -> Result<T> {
        self.codec.unmarshal(data)
    }

    pub fn unmarshal_strict(&self, data: &[u8]) -> Result<T> {
        self.codec.unmarshal_strict(data)
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.codec.fingerprint()
    }

    /// The untyped codec underneath.
    pub fn codec(&self) -> &Codec<S> {
        &self.codec
    }
}

impl<T, S: Clone> Clone for TypedCodec<T, S> {
    fn clone(&self) -> Self {
        Self {
            codec: self.codec.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, S: fmt::Debug> fmt::Debug for TypedCodec<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedCodec")
            .field("type", &std::any::type_name::<T>())
            .field("codec", &self.codec)
            .finish()
    }
}
