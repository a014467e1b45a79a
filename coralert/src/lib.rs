//! Coralert - data-freshness and advisory-prioritization core
//!
//! This library holds the logic the Coralert mobile client runs between the
//! network layer and the UI:
//!
//! - [`cache`]: durable per-dataset cache with versioned, atomic writes
//! - [`staleness`]: age-based Fresh/Stale/Outdated classification
//! - [`connectivity`]: reducer turning reachability and freshness into a
//!   presentation state
//! - [`advisory`]: deterministic ranking of incidents, rain gauges and alerts
//! - [`highlight`]: single-slot, lazily expiring map focus target
//!
//! Nothing here performs network I/O or renders anything. Time is always read
//! through a [`clock::Clock`] so hosts and tests control it explicitly.

pub mod advisory;
pub mod cache;
pub mod clock;
pub mod config;
pub mod connectivity;
pub mod dataset;
pub mod geo;
pub mod highlight;
pub mod logging;
pub mod palette;
pub mod staleness;

pub use clock::{Clock, ManualClock, SystemClock};
pub use dataset::Dataset;
