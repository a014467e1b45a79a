//! Age-based freshness classification.
//!
//! A cached dataset is classified purely from how long ago it was stored:
//!
//! ```text
//! age <  stale            → Fresh
//! stale <= age < outdated → Stale
//! age >= outdated         → Outdated
//! (no entry)              → Outdated
//! ```
//!
//! Thresholds are configured per dataset ([`ThresholdTable`]) and default to
//! 5/15 minutes. Server-declared staleness flags are not consulted here.

mod format;
mod thresholds;

pub use format::{age_compact, age_formatted};
pub use thresholds::{
    StalenessThresholds, ThresholdError, ThresholdTable, DEFAULT_OUTDATED_MINUTES,
    DEFAULT_STALE_MINUTES,
};

/// Freshness verdict for a cached dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Staleness {
    /// Younger than the stale threshold.
    Fresh,
    /// Past the stale threshold but not yet outdated.
    Stale,
    /// Past the outdated threshold, or absent.
    Outdated,
}

impl Staleness {
    /// Whether the data is anything other than fresh.
    pub fn needs_refresh(&self) -> bool {
        !matches!(self, Staleness::Fresh)
    }
}

impl std::fmt::Display for Staleness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Staleness::Fresh => write!(f, "fresh"),
            Staleness::Stale => write!(f, "stale"),
            Staleness::Outdated => write!(f, "outdated"),
        }
    }
}

/// Classify an age against a threshold pair.
///
/// `None` means "no entry" and is always [`Staleness::Outdated`].
pub fn classify_age(age_minutes: Option<u64>, thresholds: StalenessThresholds) -> Staleness {
    match age_minutes {
        None => Staleness::Outdated,
        Some(age) if age < u64::from(thresholds.stale_minutes()) => Staleness::Fresh,
        Some(age) if age < u64::from(thresholds.outdated_minutes()) => Staleness::Stale,
        Some(_) => Staleness::Outdated,
    }
}
