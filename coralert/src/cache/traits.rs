//! Core trait for the durable key-value backend.
//!
//! The `KeyValueStore` trait is the single opaque store the cache persists
//! into. It knows nothing about cache entries, timestamps or staleness; the
//! [`CacheStore`](super::CacheStore) layers those on top.
//!
//! # Design Principles
//!
//! - **String keys**: Human-readable, usable directly as file names
//! - **String values**: Serialized entries, no format opinions imposed
//! - **Synchronous**: Backends are local; the core never blocks on a network
//! - **Dyn-compatible**: Used as `Arc<dyn KeyValueStore>`
//!
//! # Example
//!
//! ```ignore
//! use coralert::cache::{KeyValueStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.set("weather", "{...}".to_string())?;
//! let value = store.get("weather")?;
//! ```

use thiserror::Error;

/// Maximum accepted key length in bytes.
pub const MAX_KEY_LEN: usize = 128;

/// Errors that can occur during backend operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error during backend operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key cannot be stored by this backend.
    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: &'static str },

    /// Entry could not be serialized.
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable key-value storage.
///
/// Implementations must make `set` atomic per key: a concurrent or
/// subsequent `get` sees either the old value or the new one, never a mix.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`.
pub trait KeyValueStore: Send + Sync {
    /// Retrieve a value by key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` if the key exists
    /// - `Ok(None)` if the key is not found
    /// - `Err(_)` if the backend failed
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store a value, replacing any previous value for the key.
    fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Delete a value by key.
    ///
    /// Returns `Ok(true)` if the key existed.
    fn remove(&self, key: &str) -> Result<bool, StoreError>;

    /// List every stored key, in no particular order.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// Validate a key before handing it to a backend.
///
/// Keys are restricted to `[A-Za-z0-9_.-]` so that every backend (including
/// the file store) can use them verbatim. A leading `.` is rejected so keys
/// never collide with hidden or temporary files.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let invalid = |reason| {
        Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason,
        })
    };

    if key.is_empty() {
        return invalid("key is empty");
    }
    if key.len() > MAX_KEY_LEN {
        return invalid("key is longer than 128 bytes");
    }
    if key.starts_with('.') {
        return invalid("key starts with '.'");
    }
    if !key
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
    {
        return invalid("key contains characters outside [A-Za-z0-9_.-]");
    }
    Ok(())
}
