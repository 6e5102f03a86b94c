use std::fmt;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::codec::{Codec, JsonCodec};
use crate::error::Result;
use crate::store::Store;

/// What a persisted value does when a write cannot be completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritePolicy {
    /// Failed writes are logged and dropped; the caller always sees success.
    #[default]
    Silent,
    /// Failed writes are returned to the caller.
    Strict,
}

// ------------- PersistedDefault -------------
/// A value living in a [`Store`] under a fixed key, with a default that is
/// reported whenever the key is missing or its bytes do not decode.
///
/// Nothing is cached: each read and write goes through the store.
pub struct PersistedDefault<V, S, C = JsonCodec> {
    key: String,
    default_value: V,
    store: S,
    codec: C,
    policy: WritePolicy,
}

impl<V, S> PersistedDefault<V, S, JsonCodec>
where
    V: Clone,
    S: Store,
    JsonCodec: Codec<V>,
{
    pub fn new(key: impl Into<String>, default_value: V, store: S) -> Self {
        Self::with_codec(key, default_value, store, JsonCodec)
    }
}

impl<V, S, C> PersistedDefault<V, S, C>
where
    V: Clone,
    S: Store,
    C: Codec<V>,
{
    pub fn with_codec(key: impl Into<String>, default_value: V, store: S, codec: C) -> Self {
        Self {
            key: key.into(),
            default_value,
            store,
            codec,
            policy: WritePolicy::default(),
        }
    }
    pub fn with_policy(mut self, policy: WritePolicy) -> Self {
        self.policy = policy;
        self
    }
    pub fn key(&self) -> &str {
        &self.key
    }
    pub fn default_value(&self) -> &V {
        &self.default_value
    }
    pub fn policy(&self) -> WritePolicy {
        self.policy
    }
    pub fn value(&self) -> V {
        let bytes = match self.store.get(&self.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return self.default_value.clone(),
            Err(err) => {
                warn!(key = %self.key, error = %err, "store read failed, using default");
                return self.default_value.clone();
            }
        };
        match self.codec.decode(&bytes) {
            Ok(value) => value,
            Err(err) => {
                warn!(key = %self.key, error = %err, "stored value does not decode, using default");
                self.default_value.clone()
            }
        }
    }
    /// Encodes and stores `value`. Under [`WritePolicy::Silent`] this never
    /// fails and a value that cannot be encoded or stored is dropped, leaving
    /// whatever was stored before.
    pub fn set_value(&self, value: V) -> Result<()> {
        let outcome = self
            .codec
            .encode(&value)
            .and_then(|bytes| self.store.set(&self.key, &bytes));
        settle(&self.key, self.policy, outcome, "write")
    }
    /// Removes the key so that reads report the default again. Removing an
    /// absent key is fine.
    pub fn reset(&self) -> Result<()> {
        settle(&self.key, self.policy, self.store.remove(&self.key), "reset")
    }
    pub fn is_modified(&self) -> bool {
        is_modified(&self.store, &self.key)
    }
    pub fn projection(&self) -> PersistedState<'_, V, S> {
        PersistedState {
            key: self.key.clone(),
            default_value: self.default_value.clone(),
            current_value: self.value(),
            store: &self.store,
            policy: self.policy,
        }
    }
}

impl<V: fmt::Debug, S, C> fmt::Debug for PersistedDefault<V, S, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PersistedDefault")
            .field("key", &self.key)
            .field("default_value", &self.default_value)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

// A failed write or reset is swallowed under the silent policy.
fn settle(key: &str, policy: WritePolicy, outcome: Result<()>, action: &str) -> Result<()> {
    match outcome {
        Ok(()) => {
            debug!(key, action, "persisted value updated");
            Ok(())
        }
        Err(err) => match policy {
            WritePolicy::Silent => {
                warn!(key, action, error = %err, "persisted value left unchanged");
                Ok(())
            }
            WritePolicy::Strict => Err(err),
        },
    }
}

fn is_modified<S: Store>(store: &S, key: &str) -> bool {
    match store.has(key) {
        Ok(has) => has,
        Err(err) => {
            warn!(key, error = %err, "store lookup failed, treating value as unmodified");
            false
        }
    }
}

// ------------- PersistedState -------------
/// Snapshot of a persisted value taken by [`PersistedDefault::projection`].
///
/// `key`, `default_value` and `current_value` are fixed at projection time,
/// while [`is_modified`](Self::is_modified) and [`reset`](Self::reset) act on
/// the live store.
pub struct PersistedState<'a, V, S> {
    pub key: String,
    pub default_value: V,
    pub current_value: V,
    store: &'a S,
    policy: WritePolicy,
}

impl<V, S: Store> PersistedState<'_, V, S> {
    pub fn is_modified(&self) -> bool {
        is_modified(self.store, &self.key)
    }
    pub fn reset(&self) -> Result<()> {
        settle(&self.key, self.policy, self.store.remove(&self.key), "reset")
    }
}

impl<V: fmt::Debug, S> fmt::Debug for PersistedState<'_, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PersistedState")
            .field("key", &self.key)
            .field("default_value", &self.default_value)
            .field("current_value", &self.current_value)
            .finish_non_exhaustive()
    }
}
