//! In-memory backend.
//!
//! Holds serialized entries in a `HashMap` behind a `parking_lot::RwLock`.
//! Readers never block each other; a `set` swaps the whole value under the
//! write lock, so readers see either the old or the new string.
//!
//! Nothing survives the process. Useful for tests and for hosts that want
//! the cache semantics without durability.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::cache::traits::{validate_key, KeyValueStore, StoreError};

/// In-memory key-value backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    /// Whether the store holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        validate_key(key)?;
        self.values.write().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.values.write().remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.values.read().keys().cloned().collect())
    }
}
