//! Versioned, freshness-aware cache store.
//!
//! `CacheStore` sits between the network collaborator and everything that
//! reads cached datasets. It owns three things:
//!
//! - an in-memory index of the current entry per key (`Arc<CacheEntry>`,
//!   swapped whole on write, so readers never see a partial entry)
//! - a per-key version counter used to reject out-of-order writes
//! - the staleness thresholds used by [`CacheStore::classify`]
//!
//! # Write Ordering
//!
//! A fetch that started earlier can finish later. To keep the newest data,
//! the collaborator takes a [`WriteTicket`] *before* fetching and commits it
//! afterwards. A commit only lands if no newer ticket for the same key has
//! already been committed:
//!
//! ```text
//! t1 = begin_write("radar")    version 1
//! t2 = begin_write("radar")    version 2
//! commit(t2, ...)              Applied
//! commit(t1, ...)              Superseded (1 <= 2)
//! ```
//!
//! # Failure Model
//!
//! Reads are total. A key that was never stored, can't be read from the
//! backend, or holds an entry that no longer deserializes is simply absent
//! and classifies as [`Staleness::Outdated`]. Only operations that write to
//! the backend return errors.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::cache::entry::{CacheEntry, EntryMeta};
use crate::cache::providers::MemoryStore;
use crate::cache::stats::{CacheStats, Counters};
use crate::cache::traits::{validate_key, KeyValueStore, StoreError};
use crate::clock::SharedClock;
use crate::staleness::{age_compact, age_formatted, classify_age, Staleness, ThresholdTable};

/// Version stamp issued before a fetch starts.
///
/// Tickets are not `Clone`: each one can be committed at most once.
#[derive(Debug, PartialEq, Eq)]
pub struct WriteTicket {
    key: String,
    version: u64,
}

impl WriteTicket {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

/// Result of a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The entry was stored.
    Applied,
    /// A newer write had already landed; nothing was stored.
    Superseded {
        /// Version of the write that is currently stored.
        current: u64,
    },
}

impl PutOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, PutOutcome::Applied)
    }
}

/// Freshness summary for one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStatus {
    pub key: String,
    pub staleness: Staleness,
    pub age_minutes: Option<u64>,
    pub entry: Option<Arc<CacheEntry>>,
}

#[derive(Debug, Default)]
struct SlotState {
    /// Highest version handed out by `begin_write`.
    issued: u64,
    /// Version of the write currently stored (0 = none since startup).
    committed: u64,
    entry: Option<Arc<CacheEntry>>,
    /// Whether the backend has been consulted (or overridden by a write).
    hydrated: bool,
}

/// Per-key bookkeeping.
///
/// `io` serializes backend access for the key and is held across disk
/// writes. `state` is only held for in-memory updates, so readers of a
/// hydrated key never wait on the disk.
#[derive(Debug, Default)]
struct Slot {
    io: Mutex<()>,
    state: Mutex<SlotState>,
}

/// Durable per-dataset cache with staleness classification.
pub struct CacheStore {
    backend: Arc<dyn KeyValueStore>,
    clock: SharedClock,
    thresholds: ThresholdTable,
    slots: DashMap<String, Arc<Slot>>,
    counters: Counters,
}

impl CacheStore {
    /// Create a store over `backend`.
    ///
    /// Entries already in the backend are loaded lazily on first read.
    pub fn new(
        backend: Arc<dyn KeyValueStore>,
        clock: SharedClock,
        thresholds: ThresholdTable,
    ) -> Self {
        Self {
            backend,
            clock,
            thresholds,
            slots: DashMap::new(),
            counters: Counters::default(),
        }
    }

    /// Create a store backed by a fresh [`MemoryStore`].
    pub fn in_memory(clock: SharedClock, thresholds: ThresholdTable) -> Self {
        Self::new(Arc::new(MemoryStore::new()), clock, thresholds)
    }

    /// The thresholds used by [`classify`](Self::classify).
    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    /// The clock entries are stamped and aged with.
    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }

    /// The slot for a validated `key`. The map shard is only locked for the
    /// lookup itself.
    fn slot(&self, key: &str) -> Arc<Slot> {
        if let Some(slot) = self.slots.get(key) {
            return Arc::clone(slot.value());
        }
        Arc::clone(self.slots.entry(key.to_string()).or_default().value())
    }

    /// Issue a version stamp for an upcoming write to `key`.
    pub fn begin_write(&self, key: &str) -> Result<WriteTicket, StoreError> {
        validate_key(key)?;
        let slot = self.slot(key);
        let mut state = slot.state.lock();
        state.issued += 1;
        Ok(WriteTicket {
            key: key.to_string(),
            version: state.issued,
        })
    }

    /// Store `payload` under the ticket's key unless a newer write already landed.
    ///
    /// The entry is stamped with the clock's current time. Writes to one key
    /// are serialized by the key's I/O lock; readers keep seeing the old entry
    /// until the backend write has finished, then the new one.
    pub fn commit(
        &self,
        ticket: WriteTicket,
        payload: impl Into<String>,
        meta: EntryMeta,
    ) -> Result<PutOutcome, StoreError> {
        validate_key(&ticket.key)?;
        let slot = self.slot(&ticket.key);
        let _io = slot.io.lock();

        let committed = slot.state.lock().committed;
        if ticket.version <= committed {
            self.counters.superseded();
            warn!(
                key = %ticket.key,
                version = ticket.version,
                current = committed,
                "Rejected out-of-order cache write"
            );
            return Ok(PutOutcome::Superseded { current: committed });
        }

        let entry = CacheEntry::new(ticket.key.as_str(), payload, self.clock.now(), meta);
        let raw = entry.to_persisted()?;
        self.backend.set(&ticket.key, raw)?;

        debug!(
            key = %ticket.key,
            version = ticket.version,
            bytes = entry.payload.len(),
            "Cached dataset"
        );

        let mut state = slot.state.lock();
        state.entry = Some(Arc::new(entry));
        state.committed = ticket.version;
        state.hydrated = true;
        self.counters.write();
        Ok(PutOutcome::Applied)
    }

    /// Store or replace the entry for `key` right away.
    pub fn put(
        &self,
        key: &str,
        payload: impl Into<String>,
        meta: EntryMeta,
    ) -> Result<PutOutcome, StoreError> {
        let ticket = self.begin_write(key)?;
        self.commit(ticket, payload, meta)
    }

    /// The current entry for `key`, if any.
    pub fn get(&self, key: &str) -> Option<Arc<CacheEntry>> {
        let entry = self.lookup(key);
        if entry.is_some() {
            self.counters.hit();
        } else {
            self.counters.miss();
        }
        entry
    }

    fn lookup(&self, key: &str) -> Option<Arc<CacheEntry>> {
        if validate_key(key).is_err() {
            return None;
        }

        let slot = self.slot(key);
        {
            let state = slot.state.lock();
            if state.hydrated {
                return state.entry.clone();
            }
        }

        // Another reader may have hydrated while we waited for the I/O lock.
        let _io = slot.io.lock();
        {
            let state = slot.state.lock();
            if state.hydrated {
                return state.entry.clone();
            }
        }

        let entry = self.load(key);
        let mut state = slot.state.lock();
        state.entry = entry.clone();
        state.hydrated = true;
        entry
    }

    /// Read one entry from the backend; any failure means "absent".
    fn load(&self, key: &str) -> Option<Arc<CacheEntry>> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Cache backend read failed, treating as absent");
                return None;
            }
        };

        match CacheEntry::from_persisted(key, &raw) {
            Ok(entry) => {
                debug!(key, cached_at = %entry.cached_at, "Loaded cached dataset");
                Some(Arc::new(entry))
            }
            Err(e) => {
                self.counters.eviction();
                warn!(key, error = %e, "Evicting unreadable cache entry");
                if let Err(e) = self.backend.remove(key) {
                    warn!(key, error = %e, "Failed to remove unreadable cache entry");
                }
                None
            }
        }
    }

    /// Whole minutes since `key` was stored, or `None` if absent.
    pub fn age_minutes(&self, key: &str) -> Option<u64> {
        self.lookup(key)
            .map(|entry| entry.age_minutes(self.clock.now()))
    }

    /// Freshness of `key`. Absent keys are [`Staleness::Outdated`].
    pub fn classify(&self, key: &str) -> Staleness {
        classify_age(self.age_minutes(key), self.thresholds.get(key))
    }

    /// Long age label ("12 min ago"), or `None` if absent.
    pub fn age_formatted(&self, key: &str) -> Option<String> {
        self.age_minutes(key).map(age_formatted)
    }

    /// Compact age label ("12m"), or `None` if absent.
    pub fn age_compact(&self, key: &str) -> Option<String> {
        self.age_minutes(key).map(age_compact)
    }

    /// Classification, age and entry for `key` in one read.
    pub fn status(&self, key: &str) -> DatasetStatus {
        let entry = self.lookup(key);
        let age_minutes = entry
            .as_ref()
            .map(|e| e.age_minutes(self.clock.now()));
        DatasetStatus {
            key: key.to_string(),
            staleness: classify_age(age_minutes, self.thresholds.get(key)),
            age_minutes,
            entry,
        }
    }

    /// Remove the entry for `key`.
    ///
    /// The version counter is kept, so tickets issued before the clear are
    /// still rejected if they commit afterwards. Returns whether anything was
    /// removed.
    pub fn clear(&self, key: &str) -> Result<bool, StoreError> {
        validate_key(key)?;
        let slot = self.slot(key);
        let _io = slot.io.lock();
        let in_backend = self.backend.remove(key)?;

        let mut state = slot.state.lock();
        let in_memory = state.entry.take().is_some();
        state.committed = state.issued;
        state.hydrated = true;

        if in_backend || in_memory {
            debug!(key, "Cleared cached dataset");
        }
        Ok(in_backend || in_memory)
    }

    /// Remove every entry. Returns the number of keys removed.
    pub fn clear_all(&self) -> Result<usize, StoreError> {
        let mut removed = 0;
        for key in self.keys() {
            if self.clear(&key)? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Every key with a stored entry, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = match self.backend.keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!(error = %e, "Failed to list cache backend keys");
                Vec::new()
            }
        };
        keys.extend(
            self.slots
                .iter()
                .filter(|slot| slot.value().state.lock().entry.is_some())
                .map(|slot| slot.key().clone()),
        );
        keys.sort();
        keys.dedup();
        keys
    }

    /// Point-in-time counters.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot()
    }
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("slots", &self.slots.len())
            .field("thresholds", &self.thresholds)
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::entry::DataSource;
    use crate::clock::{Clock, ManualClock};
    use crate::staleness::StalenessThresholds;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::mpsc;
    use std::time::Duration;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn store_with(thresholds: ThresholdTable) -> (CacheStore, ManualClock, Arc<MemoryStore>) {
        let clock = ManualClock::new(t0());
        let backend = Arc::new(MemoryStore::new());
        let store = CacheStore::new(backend.clone(), Arc::new(clock.clone()), thresholds);
        (store, clock, backend)
    }

    fn store() -> (CacheStore, ManualClock, Arc<MemoryStore>) {
        store_with(ThresholdTable::default())
    }

    #[test]
    fn test_put_and_get() {
        let (store, _, _) = store();
        let outcome = store
            .put("weather", r#"{"temp":30}"#, EntryMeta::api())
            .unwrap();

        assert_eq!(outcome, PutOutcome::Applied);
        let entry = store.get("weather").unwrap();
        assert_eq!(entry.payload, r#"{"temp":30}"#);
        assert_eq!(entry.cached_at, t0());
        assert_eq!(entry.source, Some(DataSource::Api));
    }

    #[test]
    fn test_put_replaces_entry() {
        let (store, clock, _) = store();
        store.put("radar", "a", EntryMeta::default()).unwrap();
        clock.advance_minutes(3);
        store.put("radar", "b", EntryMeta::default()).unwrap();

        let entry = store.get("radar").unwrap();
        assert_eq!(entry.payload, "b");
        assert_eq!(entry.cached_at, clock.now());
        assert_eq!(store.keys(), vec!["radar"]);
    }

    #[test]
    fn test_classify_right_after_put_is_fresh() {
        let (store, _, _) = store();
        store.put("incidents", "[]", EntryMeta::api()).unwrap();
        assert_eq!(store.classify("incidents"), Staleness::Fresh);
        assert_eq!(store.age_minutes("incidents"), Some(0));
    }

    #[test]
    fn test_classify_never_put_is_outdated() {
        let (store, _, _) = store();
        assert_eq!(store.classify("forecast"), Staleness::Outdated);
        assert_eq!(store.age_minutes("forecast"), None);
        assert_eq!(store.age_compact("forecast"), None);
    }

    #[test]
    fn test_classify_invalid_key_is_outdated() {
        let (store, _, _) = store();
        assert_eq!(store.classify("../../etc/passwd"), Staleness::Outdated);
    }

    #[test]
    fn test_classify_moves_through_buckets() {
        let (store, clock, _) = store();
        store.put("weather", "{}", EntryMeta::api()).unwrap();

        clock.advance_minutes(4);
        assert_eq!(store.classify("weather"), Staleness::Fresh);
        clock.advance_minutes(1);
        assert_eq!(store.classify("weather"), Staleness::Stale);
        clock.advance_minutes(10);
        assert_eq!(store.classify("weather"), Staleness::Outdated);
    }

    #[test]
    fn test_per_dataset_thresholds() {
        let table = ThresholdTable::default()
            .with("incidents", StalenessThresholds::new(5, 10).unwrap());
        let (store, clock, _) = store_with(table);
        store.put("incidents", "[]", EntryMeta::api()).unwrap();
        store.put("weather", "{}", EntryMeta::api()).unwrap();

        clock.advance_minutes(11);
        assert_eq!(store.classify("incidents"), Staleness::Outdated);
        assert_eq!(store.classify("weather"), Staleness::Stale);
        assert_eq!(store.age_compact("incidents").as_deref(), Some("11m"));
        assert_eq!(
            store.age_formatted("incidents").as_deref(),
            Some("11 min ago")
        );
    }

    #[test]
    fn test_out_of_order_commit_is_superseded() {
        let (store, _, _) = store();
        let older = store.begin_write("radar").unwrap();
        let newer = store.begin_write("radar").unwrap();
        assert!(older.version() < newer.version());

        assert_eq!(
            store.commit(newer, "new", EntryMeta::api()).unwrap(),
            PutOutcome::Applied
        );
        assert_eq!(
            store.commit(older, "old", EntryMeta::api()).unwrap(),
            PutOutcome::Superseded { current: 2 }
        );

        assert_eq!(store.get("radar").unwrap().payload, "new");
        assert_eq!(store.stats().superseded, 1);
        assert_eq!(store.stats().writes, 1);
    }

    #[test]
    fn test_in_order_commits_both_apply() {
        let (store, _, _) = store();
        let first = store.begin_write("radar").unwrap();
        let second = store.begin_write("radar").unwrap();

        assert!(store.commit(first, "one", EntryMeta::api()).unwrap().is_applied());
        assert!(store.commit(second, "two", EntryMeta::api()).unwrap().is_applied());
        assert_eq!(store.get("radar").unwrap().payload, "two");
    }

    #[test]
    fn test_versions_are_per_key() {
        let (store, _, _) = store();
        let radar = store.begin_write("radar").unwrap();
        let _ = store.begin_write("weather").unwrap();
        let _ = store.begin_write("weather").unwrap();

        assert_eq!(radar.version(), 1);
        assert!(store.commit(radar, "r", EntryMeta::api()).unwrap().is_applied());
    }

    #[test]
    fn test_clear_removes_and_rejects_older_tickets() {
        let (store, _, backend) = store();
        let in_flight = store.begin_write("incidents").unwrap();
        store.put("incidents", "[]", EntryMeta::api()).unwrap();

        assert!(store.clear("incidents").unwrap());
        assert!(store.get("incidents").is_none());
        assert!(backend.is_empty());
        assert_eq!(store.classify("incidents"), Staleness::Outdated);

        let outcome = store.commit(in_flight, "[1]", EntryMeta::api()).unwrap();
        assert!(!outcome.is_applied());
        assert!(store.get("incidents").is_none());
    }

    #[test]
    fn test_clear_outstanding_ticket_issued_before_clear_is_rejected() {
        let (store, _, _) = store();
        let in_flight = store.begin_write("weather").unwrap();
        store.clear("weather").unwrap();

        let outcome = store.commit(in_flight, "{}", EntryMeta::api()).unwrap();
        assert_eq!(outcome, PutOutcome::Superseded { current: 1 });
    }

    #[test]
    fn test_clear_missing_key() {
        let (store, _, _) = store();
        assert!(!store.clear("weather").unwrap());
    }

    #[test]
    fn test_clear_all() {
        let (store, _, _) = store();
        store.put("weather", "{}", EntryMeta::api()).unwrap();
        store.put("radar", "{}", EntryMeta::api()).unwrap();

        assert_eq!(store.clear_all().unwrap(), 2);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_hydrates_from_backend() {
        let clock = ManualClock::new(t0());
        let backend = Arc::new(MemoryStore::new());
        {
            let writer = CacheStore::new(
                backend.clone(),
                Arc::new(clock.clone()),
                ThresholdTable::default(),
            );
            writer.put("forecast", "[1,2,3]", EntryMeta::api()).unwrap();
        }

        clock.advance_minutes(7);
        let reader = CacheStore::new(backend, Arc::new(clock), ThresholdTable::default());
        let entry = reader.get("forecast").unwrap();
        assert_eq!(entry.payload, "[1,2,3]");
        assert_eq!(reader.age_minutes("forecast"), Some(7));
        assert_eq!(reader.classify("forecast"), Staleness::Stale);
    }

    #[test]
    fn test_corrupt_entry_is_evicted() {
        let (store, _, backend) = store();
        backend.set("weather", "{not json".to_string()).unwrap();

        assert!(store.get("weather").is_none());
        assert_eq!(store.classify("weather"), Staleness::Outdated);
        assert!(backend.get("weather").unwrap().is_none());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_write_after_corrupt_entry_recovers() {
        let (store, _, backend) = store();
        backend.set("weather", "garbage".to_string()).unwrap();
        assert!(store.get("weather").is_none());

        store.put("weather", "{}", EntryMeta::api()).unwrap();
        assert_eq!(store.classify("weather"), Staleness::Fresh);
    }

    #[test]
    fn test_invalid_key_write_is_an_error() {
        let (store, _, _) = store();
        let result = store.put("bad key", "{}", EntryMeta::api());
        assert!(matches!(result, Err(StoreError::InvalidKey { .. })));
    }

    #[test]
    fn test_begin_write_rejects_invalid_key() {
        let (store, _, _) = store();
        let result = store.begin_write("../escape");
        assert!(matches!(result, Err(StoreError::InvalidKey { .. })));
        assert_eq!(store.slots.len(), 0);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_status_reports_everything() {
        let (store, clock, _) = store();
        store.put("alerts_inbox", "[]", EntryMeta::api()).unwrap();
        clock.advance_minutes(6);

        let status = store.status("alerts_inbox");
        assert_eq!(status.staleness, Staleness::Stale);
        assert_eq!(status.age_minutes, Some(6));
        assert!(status.entry.is_some());

        let missing = store.status("radar");
        assert_eq!(missing.staleness, Staleness::Outdated);
        assert!(missing.entry.is_none());
    }

    #[test]
    fn test_hit_and_miss_counters() {
        let (store, _, _) = store();
        store.put("weather", "{}", EntryMeta::api()).unwrap();
        store.get("weather");
        store.get("weather");
        store.get("radar");

        let stats = store.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_concurrent_readers_see_whole_entries() {
        let (store, _, _) = store();
        store.put("radar", "v0".repeat(512), EntryMeta::api()).unwrap();

        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..200 {
                        let entry = store.get("radar").unwrap();
                        let first = &entry.payload[..2];
                        assert!(entry.payload.len() == 1024);
                        assert!(entry.payload.as_bytes().chunks(2).all(|c| c == first.as_bytes()));
                    }
                });
            }
            s.spawn(|| {
                for i in 1..50 {
                    let tag = format!("v{}", i % 10);
                    store.put("radar", tag.repeat(512), EntryMeta::api()).unwrap();
                }
            });
        });

        assert_eq!(store.stats().writes, 50);
    }

    /// Backend whose `set` for one key blocks until released.
    struct GatedStore {
        inner: MemoryStore,
        gated_key: &'static str,
        entered: Mutex<Option<mpsc::Sender<()>>>,
        release: Mutex<mpsc::Receiver<()>>,
    }

    impl KeyValueStore for GatedStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
            if key == self.gated_key {
                if let Some(entered) = self.entered.lock().take() {
                    entered.send(()).unwrap();
                    self.release.lock().recv().unwrap();
                }
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<bool, StoreError> {
            self.inner.remove(key)
        }

        fn keys(&self) -> Result<Vec<String>, StoreError> {
            self.inner.keys()
        }
    }

    #[test]
    fn test_slow_backend_write_does_not_block_other_keys() {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let backend = Arc::new(GatedStore {
            inner: MemoryStore::new(),
            gated_key: "radar",
            entered: Mutex::new(None),
            release: Mutex::new(release_rx),
        });
        let clock = ManualClock::new(t0());
        let store = Arc::new(CacheStore::new(
            backend.clone(),
            Arc::new(clock),
            ThresholdTable::default(),
        ));
        store.put("radar", "old", EntryMeta::api()).unwrap();
        *backend.entered.lock() = Some(entered_tx);

        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || store.put("radar", "new", EntryMeta::api()).unwrap())
        };
        entered_rx.recv_timeout(Duration::from_secs(5)).unwrap();

        // The "radar" backend write is parked. Other keys and readers of
        // "radar" must still make progress.
        let (done_tx, done_rx) = mpsc::channel();
        let others = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for key in ["weather", "incidents", "forecast", "alerts_inbox"] {
                    store.put(key, "{}", EntryMeta::api()).unwrap();
                    assert!(store.get(key).is_some());
                }
                let radar = store.get("radar").unwrap();
                done_tx.send(radar.payload.clone()).unwrap();
            })
        };
        let seen = done_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(seen, "old");

        release_tx.send(()).unwrap();
        assert_eq!(writer.join().unwrap(), PutOutcome::Applied);
        others.join().unwrap();
        assert_eq!(store.get("radar").unwrap().payload, "new");
    }
}
