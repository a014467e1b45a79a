//! Well-known dataset keys.
//!
//! The cache accepts any string key, but the client fetches a fixed set of
//! datasets from the backend. This enum names them so hosts and the
//! configuration file don't have to repeat string literals.

use std::str::FromStr;

/// A dataset the client caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dataset {
    Weather,
    Forecast,
    Radar,
    Incidents,
    RainGauges,
    AlertsInbox,
}

impl Dataset {
    /// The cache key for this dataset.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::Forecast => "forecast",
            Self::Radar => "radar",
            Self::Incidents => "incidents",
            Self::RainGauges => "rain_gauges",
            Self::AlertsInbox => "alerts_inbox",
        }
    }

    /// All known datasets, in display order.
    pub fn all() -> &'static [Dataset] {
        &[
            Self::Weather,
            Self::Forecast,
            Self::Radar,
            Self::Incidents,
            Self::RainGauges,
            Self::AlertsInbox,
        ]
    }
}

impl AsRef<str> for Dataset {
    fn as_ref(&self) -> &str {
        self.key()
    }
}

impl std::fmt::Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|d| d.key() == s)
            .ok_or_else(|| format!("unknown dataset '{}'", s))
    }
}
