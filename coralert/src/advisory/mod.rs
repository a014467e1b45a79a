//! Advisory prioritization.
//!
//! Turns the cached incidents, rain gauge readings and inbox alerts into a
//! short, ranked list of [`AdvisoryCard`]s for the home screen. Ranking is a
//! pure function of the inputs, the [`AdvisoryConfig`] and an explicit `now`.
//!
//! Priorities (lower first):
//!
//! | Source    | Condition        | Priority |
//! |-----------|------------------|----------|
//! | alert     | emergency        | 0        |
//! | alert     | alert            | 1        |
//! | incident  | critical         | 1        |
//! | incident  | otherwise        | 2        |
//! | rain      | very strong      | 3        |
//! | rain      | strong           | 4        |
//! | rain      | moderate         | 5        |
//! | alert     | info             | 6        |

mod config;
mod model;
mod prioritizer;
mod snapshot;

pub use config::{
    AdvisoryConfig, DEFAULT_MAX_CARDS, DEFAULT_RAIN_THRESHOLD_15MIN, DEFAULT_RAIN_THRESHOLD_1HOUR,
};
pub use model::{
    ActiveAlert, AdvisoryCard, AlertSeverity, CardSource, Incident, IncidentSeverity,
    IncidentType, RainGauge, RainLevel,
};
pub use prioritizer::{alert_cards, incident_cards, prioritize, rain_cards, Prioritizer};
pub use snapshot::{decode_alerts, decode_incidents, decode_rain_gauges, AdvisorySnapshot};
