//! Durable dataset cache.
//!
//! The cache keeps the last successful response for each dataset so the app
//! can keep working offline, and tells callers how old that data is.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │          CacheStore          │  versioned writes, staleness, stats
//! │  DashMap<key, Arc<Entry>>    │
//! └──────────────┬───────────────┘
//!                │ KeyValueStore
//!       ┌────────┴────────┐
//!       ▼                 ▼
//!  MemoryStore        FileStore
//! ```
//!
//! Backends only move opaque strings. [`CacheStore`] owns the entry format,
//! the clock and the thresholds.

mod entry;
pub mod providers;
mod stats;
mod store;
mod traits;

pub use entry::{CacheEntry, DataSource, EntryMeta};
pub use providers::{FileStore, MemoryStore};
pub use stats::CacheStats;
pub use store::{CacheStore, DatasetStatus, PutOutcome, WriteTicket};
pub use traits::{validate_key, KeyValueStore, StoreError, MAX_KEY_LEN};
