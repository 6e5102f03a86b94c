use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ProjectedError, Result};

/// Turns a value into the bytes handed to a [`Store`](crate::store::Store)
/// and back.
pub trait Codec<V> {
    fn encode(&self, value: &V) -> Result<Vec<u8>>;
    fn decode(&self, bytes: &[u8]) -> Result<V>;
}

// ------------- JSON -------------
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl<V: Serialize + DeserializeOwned> Codec<V> for JsonCodec {
    fn encode(&self, value: &V) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| ProjectedError::Encode(e.to_string()))
    }
    fn decode(&self, bytes: &[u8]) -> Result<V> {
        serde_json::from_slice(bytes).map_err(|e| ProjectedError::Decode(e.to_string()))
    }
}

// ------------- Plain functions -------------
/// A codec assembled from an encode and a decode function.
pub struct FnCodec<V, E, D> {
    encode: E,
    decode: D,
    _value: PhantomData<fn() -> V>,
}

impl<V, E, D> FnCodec<V, E, D>
where
    E: Fn(&V) -> Result<Vec<u8>>,
    D: Fn(&[u8]) -> Result<V>,
{
    pub fn new(encode: E, decode: D) -> Self {
        Self {
            encode,
            decode,
            _value: PhantomData,
        }
    }
}

impl<V, E, D> Codec<V> for FnCodec<V, E, D>
where
    E: Fn(&V) -> Result<Vec<u8>>,
    D: Fn(&[u8]) -> Result<V>,
{
    fn encode(&self, value: &V) -> Result<Vec<u8>> {
        (self.encode)(value)
    }
    fn decode(&self, bytes: &[u8]) -> Result<V> {
        (self.decode)(bytes)
    }
}

impl<V, E, D> fmt::Debug for FnCodec<V, E, D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FnCodec").finish_non_exhaustive()
    }
}
