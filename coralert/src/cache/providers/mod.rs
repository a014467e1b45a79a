//! Backend implementations.
//!
//! Each provider implements the `KeyValueStore` trait. The cache store only
//! talks to the trait, so hosts pick whichever backend fits:
//!
//! - [`MemoryStore`]: process-local, lost on exit
//! - [`FileStore`]: one JSON file per key, atomic rename on write
//!
//! ```ignore
//! use std::sync::Arc;
//! use coralert::cache::{CacheStore, FileStore};
//! use coralert::SystemClock;
//!
//! let backend = Arc::new(FileStore::open("/var/lib/coralert")?);
//! let store = CacheStore::new(backend, Arc::new(SystemClock), Default::default());
//! ```

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;
