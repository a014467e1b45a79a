//! Per-dataset staleness thresholds.

use std::collections::HashMap;

use thiserror::Error;

/// Default minutes before a dataset counts as stale.
pub const DEFAULT_STALE_MINUTES: u32 = 5;

/// Default minutes before a dataset counts as outdated.
pub const DEFAULT_OUTDATED_MINUTES: u32 = 15;

/// Rejected threshold pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("outdated threshold ({outdated}m) must be greater than stale threshold ({stale}m)")]
pub struct ThresholdError {
    pub stale: u32,
    pub outdated: u32,
}

/// A `(stale, outdated)` minute pair with `outdated > stale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessThresholds {
    stale_minutes: u32,
    outdated_minutes: u32,
}

impl StalenessThresholds {
    /// Create a threshold pair, enforcing `outdated > stale`.
    pub fn new(stale_minutes: u32, outdated_minutes: u32) -> Result<Self, ThresholdError> {
        if outdated_minutes <= stale_minutes {
            return Err(ThresholdError {
                stale: stale_minutes,
                outdated: outdated_minutes,
            });
        }
        Ok(Self {
            stale_minutes,
            outdated_minutes,
        })
    }

    pub fn stale_minutes(&self) -> u32 {
        self.stale_minutes
    }

    pub fn outdated_minutes(&self) -> u32 {
        self.outdated_minutes
    }
}

impl Default for StalenessThresholds {
    fn default() -> Self {
        Self {
            stale_minutes: DEFAULT_STALE_MINUTES,
            outdated_minutes: DEFAULT_OUTDATED_MINUTES,
        }
    }
}

/// Threshold lookup keyed by dataset, with a fallback pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThresholdTable {
    default: StalenessThresholds,
    overrides: HashMap<String, StalenessThresholds>,
}

impl ThresholdTable {
    /// Table with the given fallback and no overrides.
    pub fn with_default(default: StalenessThresholds) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    /// Set the thresholds for one dataset key.
    pub fn set(&mut self, key: impl Into<String>, thresholds: StalenessThresholds) {
        self.overrides.insert(key.into(), thresholds);
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, thresholds: StalenessThresholds) -> Self {
        self.set(key, thresholds);
        self
    }

    /// Thresholds for `key`, falling back to the default pair.
    pub fn get(&self, key: &str) -> StalenessThresholds {
        self.overrides.get(key).copied().unwrap_or(self.default)
    }

    /// The fallback pair.
    pub fn default_thresholds(&self) -> StalenessThresholds {
        self.default
    }

    /// Explicit overrides, sorted by key.
    pub fn overrides(&self) -> Vec<(&str, StalenessThresholds)> {
        let mut out: Vec<_> = self
            .overrides
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let t = StalenessThresholds::default();
        assert_eq!(t.stale_minutes(), 5);
        assert_eq!(t.outdated_minutes(), 15);
    }

    #[test]
    fn test_rejects_non_increasing_pair() {
        assert_eq!(
            StalenessThresholds::new(10, 10),
            Err(ThresholdError {
                stale: 10,
                outdated: 10
            })
        );
        assert!(StalenessThresholds::new(10, 5).is_err());
        assert!(StalenessThresholds::new(0, 1).is_ok());
    }

    #[test]
    fn test_error_message_names_both_values() {
        let err = StalenessThresholds::new(20, 10).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("20m"));
        assert!(msg.contains("10m"));
    }

    #[test]
    fn test_table_lookup_falls_back() {
        let incidents = StalenessThresholds::new(5, 10).unwrap();
        let table = ThresholdTable::default().with("incidents", incidents);

        assert_eq!(table.get("incidents"), incidents);
        assert_eq!(table.get("weather"), StalenessThresholds::default());
    }

    #[test]
    fn test_overrides_are_sorted() {
        let t = StalenessThresholds::new(1, 2).unwrap();
        let table = ThresholdTable::default()
            .with("radar", t)
            .with("alerts_inbox", t);
        let keys: Vec<_> = table.overrides().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["alerts_inbox", "radar"]);
    }
}
