//! Advisory ranking configuration.

use std::collections::BTreeSet;

use super::model::{IncidentSeverity, IncidentType};

/// Default 15-minute rain filter threshold (mm).
pub const DEFAULT_RAIN_THRESHOLD_15MIN: f64 = 10.0;

/// Default 1-hour rain filter threshold (mm).
pub const DEFAULT_RAIN_THRESHOLD_1HOUR: f64 = 25.0;

/// Default maximum number of cards returned.
pub const DEFAULT_MAX_CARDS: usize = 5;

/// Knobs for [`prioritize`](super::prioritize).
///
/// The per-source caps apply before the global `max_cards` truncation.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisoryConfig {
    /// Incident severities that produce a card.
    pub incident_severities: BTreeSet<IncidentSeverity>,

    /// Incident types ranked ahead of others at equal severity.
    pub priority_incident_types: BTreeSet<IncidentType>,

    /// A gauge qualifies at or above this 15-minute accumulation (mm).
    pub rain_threshold_15min: f64,

    /// A gauge qualifies at or above this 1-hour accumulation (mm).
    pub rain_threshold_1hour: f64,

    pub max_cards: usize,
    pub max_incidents: usize,
    pub max_rain_gauges: usize,
    pub max_alerts: usize,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            incident_severities: [IncidentSeverity::High, IncidentSeverity::Critical]
                .into_iter()
                .collect(),
            priority_incident_types: [
                IncidentType::Flooding,
                IncidentType::Landslide,
                IncidentType::Fire,
                IncidentType::Accident,
            ]
            .into_iter()
            .collect(),
            rain_threshold_15min: DEFAULT_RAIN_THRESHOLD_15MIN,
            rain_threshold_1hour: DEFAULT_RAIN_THRESHOLD_1HOUR,
            max_cards: DEFAULT_MAX_CARDS,
            max_incidents: 3,
            max_rain_gauges: 2,
            max_alerts: 2,
        }
    }
}

impl AdvisoryConfig {
    /// Whether an incident of this severity produces a card.
    pub fn includes_severity(&self, severity: IncidentSeverity) -> bool {
        self.incident_severities.contains(&severity)
    }

    /// Whether an incident type jumps ahead within its severity.
    pub fn is_priority_type(&self, incident_type: IncidentType) -> bool {
        self.priority_incident_types.contains(&incident_type)
    }

    /// Whether a reading crosses either filter threshold (inclusive).
    pub fn rain_qualifies(&self, value_15min: f64, accumulated_1h: f64) -> bool {
        value_15min >= self.rain_threshold_15min || accumulated_1h >= self.rain_threshold_1hour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdvisoryConfig::default();
        assert!(config.includes_severity(IncidentSeverity::High));
        assert!(config.includes_severity(IncidentSeverity::Critical));
        assert!(!config.includes_severity(IncidentSeverity::Medium));
        assert!(config.is_priority_type(IncidentType::Flooding));
        assert!(!config.is_priority_type(IncidentType::Traffic));
        assert_eq!(config.max_cards, 5);
        assert_eq!(
            (config.max_incidents, config.max_rain_gauges, config.max_alerts),
            (3, 2, 2)
        );
    }

    #[test]
    fn test_rain_qualifies_inclusive() {
        let config = AdvisoryConfig::default();
        assert!(config.rain_qualifies(10.0, 0.0));
        assert!(config.rain_qualifies(0.0, 25.0));
        assert!(!config.rain_qualifies(9.99, 24.99));
    }
}
