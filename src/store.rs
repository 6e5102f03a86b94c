use core::hash::BuildHasherDefault;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard};

use seahash::SeaHasher;
use tracing::debug;

use crate::error::{ProjectedError, Result};
use crate::persist::Persistor;

pub type KeyHasher = BuildHasherDefault<SeaHasher>;

/// The key-value capability a persisted value is backed by.
///
/// Implementations take `&self` so that one store can be shared by many
/// containers; any mutation happens behind the implementation's own guard.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
    /// Removing a key that is not present is not an error.
    fn remove(&self, key: &str) -> Result<()>;
    fn has(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: Store + ?Sized> Store for &S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }
    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
    fn has(&self, key: &str) -> Result<bool> {
        (**self).has(key)
    }
}

impl<S: Store + ?Sized> Store for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }
    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
    fn has(&self, key: &str) -> Result<bool> {
        (**self).has(key)
    }
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }
    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
    fn has(&self, key: &str) -> Result<bool> {
        (**self).has(key)
    }
}

// ------------- MemoryStore -------------
#[derive(Debug, Default)]
pub struct MemoryStore {
    kept: Mutex<HashMap<String, Vec<u8>, KeyHasher>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
    fn kept(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<u8>, KeyHasher>>> {
        self.kept
            .lock()
            .map_err(|e| ProjectedError::Lock(e.to_string()))
    }
    pub fn len(&self) -> Result<usize> {
        Ok(self.kept()?.len())
    }
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.kept()?.is_empty())
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.kept()?.get(key).cloned())
    }
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        debug!(key, bytes = value.len(), "memory store set");
        self.kept()?.insert(key.to_string(), value.to_vec());
        Ok(())
    }
    fn remove(&self, key: &str) -> Result<()> {
        if self.kept()?.remove(key).is_some() {
            debug!(key, "memory store remove");
        }
        Ok(())
    }
    fn has(&self, key: &str) -> Result<bool> {
        Ok(self.kept()?.contains_key(key))
    }
}

// ------------- StoreBackend -------------
/// One of the stores shipped with the crate, picked at runtime from
/// [`Settings`](crate::settings::Settings).
pub enum StoreBackend {
    Memory(MemoryStore),
    Sqlite(Persistor),
}

impl Store for StoreBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self {
            StoreBackend::Memory(store) => store.get(key),
            StoreBackend::Sqlite(store) => store.get(key),
        }
    }
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        match self {
            StoreBackend::Memory(store) => store.set(key, value),
            StoreBackend::Sqlite(store) => store.set(key, value),
        }
    }
    fn remove(&self, key: &str) -> Result<()> {
        match self {
            StoreBackend::Memory(store) => store.remove(key),
            StoreBackend::Sqlite(store) => store.remove(key),
        }
    }
    fn has(&self, key: &str) -> Result<bool> {
        match self {
            StoreBackend::Memory(store) => store.has(key),
            StoreBackend::Sqlite(store) => store.has(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poisoned_memory_store_reports_lock_errors() {
        let store = Arc::new(MemoryStore::new());
        store.set("kept", b"1").unwrap();
        let shared = Arc::clone(&store);
        let joined = std::thread::spawn(move || {
            let _guard = shared.kept.lock().unwrap();
            panic!("poisoning the store");
        })
        .join();
        assert!(joined.is_err());
        assert!(matches!(store.len(), Err(ProjectedError::Lock(_))));
        assert!(matches!(store.is_empty(), Err(ProjectedError::Lock(_))));
        assert!(matches!(store.get("kept"), Err(ProjectedError::Lock(_))));
    }
}
