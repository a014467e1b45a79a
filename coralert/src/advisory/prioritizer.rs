//! Advisory ranking.
//!
//! # Algorithm
//!
//! Each source is filtered, sorted and capped on its own, then the three
//! lists are merged and ordered by priority:
//!
//! ```text
//! incidents   severity in set → critical first → priority types first → cap 3
//! rain gauges crosses 15min/1h threshold → wettest first → cap 2
//! alerts      not expired → emergency > alert > info → cap 2
//!
//! concat(incidents, rain, alerts) → stable sort by priority → truncate 5
//! ```
//!
//! Every sort is stable, so ties keep input order and the output is fully
//! determined by the inputs and `now`.

use std::cmp::Reverse;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::config::AdvisoryConfig;
use super::model::{
    ActiveAlert, AdvisoryCard, AlertSeverity, CardSource, Incident, IncidentSeverity, RainGauge,
    RainLevel,
};
use super::snapshot::AdvisorySnapshot;
use crate::cache::CacheStore;
use crate::clock::SharedClock;
use crate::palette::ColorKey;

/// Rank a snapshot into at most `config.max_cards` cards.
pub fn prioritize(
    snapshot: &AdvisorySnapshot,
    config: &AdvisoryConfig,
    now: DateTime<Utc>,
) -> Vec<AdvisoryCard> {
    let mut cards = incident_cards(&snapshot.incidents, config);
    cards.extend(rain_cards(&snapshot.rain_gauges, config));
    cards.extend(alert_cards(&snapshot.alerts, config, now));

    cards.sort_by_key(|card| card.priority);
    cards.truncate(config.max_cards);
    cards
}

/// Cards for qualifying incidents, best first.
pub fn incident_cards(incidents: &[Incident], config: &AdvisoryConfig) -> Vec<AdvisoryCard> {
    let mut kept: Vec<&Incident> = incidents
        .iter()
        .filter(|incident| config.includes_severity(incident.severity))
        .collect();

    kept.sort_by_key(|incident| {
        (
            Reverse(incident.severity),
            !config.is_priority_type(incident.incident_type),
        )
    });

    kept.into_iter()
        .take(config.max_incidents)
        .map(incident_card)
        .collect()
}

fn incident_card(incident: &Incident) -> AdvisoryCard {
    let (priority, color_key) = match incident.severity {
        IncidentSeverity::Critical => (1, ColorKey::Critical),
        IncidentSeverity::High => (2, ColorKey::High),
        IncidentSeverity::Medium => (2, ColorKey::Alert),
        IncidentSeverity::Low => (2, ColorKey::Info),
    };

    AdvisoryCard {
        id: incident.id.clone(),
        title: incident
            .title
            .clone()
            .unwrap_or_else(|| incident.incident_type.label().to_string()),
        description: incident.description.clone().unwrap_or_default(),
        location: incident.location,
        priority,
        color_key,
        source: CardSource::Incident {
            incident_type: incident.incident_type,
            severity: incident.severity,
        },
    }
}

/// Cards for gauges over either rain threshold, wettest first.
pub fn rain_cards(gauges: &[RainGauge], config: &AdvisoryConfig) -> Vec<AdvisoryCard> {
    let mut kept: Vec<&RainGauge> = gauges
        .iter()
        .filter(|gauge| config.rain_qualifies(gauge.value_15min, gauge.effective_1h()))
        .collect();

    kept.sort_by(|a, b| b.value_15min.total_cmp(&a.value_15min));

    kept.into_iter()
        .take(config.max_rain_gauges)
        .map(rain_card)
        .collect()
}

fn rain_card(gauge: &RainGauge) -> AdvisoryCard {
    let accumulated_1h = gauge.effective_1h();
    let level = RainLevel::classify(gauge.value_15min, accumulated_1h);

    AdvisoryCard {
        id: gauge.id.clone(),
        title: level.label().to_string(),
        description: format!(
            "{}: {:.1} mm in 15 min, {:.1} mm in 1 h",
            gauge.name, gauge.value_15min, accumulated_1h
        ),
        location: gauge.location,
        priority: level.priority(),
        color_key: level.color_key(),
        source: CardSource::RainGauge {
            level,
            value_15min: gauge.value_15min,
            accumulated_1h,
        },
    }
}

/// Cards for unexpired alerts, most urgent first.
pub fn alert_cards(
    alerts: &[ActiveAlert],
    config: &AdvisoryConfig,
    now: DateTime<Utc>,
) -> Vec<AdvisoryCard> {
    let mut kept: Vec<&ActiveAlert> = alerts.iter().filter(|alert| alert.is_active(now)).collect();

    kept.sort_by_key(|alert| Reverse(alert.severity));

    kept.into_iter()
        .take(config.max_alerts)
        .map(alert_card)
        .collect()
}

fn alert_card(alert: &ActiveAlert) -> AdvisoryCard {
    let (priority, color_key) = match alert.severity {
        AlertSeverity::Emergency => (0, ColorKey::Emergency),
        AlertSeverity::Alert => (1, ColorKey::Alert),
        AlertSeverity::Info => (6, ColorKey::Info),
    };

    AdvisoryCard {
        id: alert.id.clone(),
        title: alert.title.clone(),
        description: alert.body.clone(),
        location: alert.location,
        priority,
        color_key,
        source: CardSource::Alert {
            severity: alert.severity,
        },
    }
}

/// Ranking entry point bundling configuration and a clock.
pub struct Prioritizer {
    config: AdvisoryConfig,
    clock: SharedClock,
}

impl Prioritizer {
    pub fn new(config: AdvisoryConfig, clock: SharedClock) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &AdvisoryConfig {
        &self.config
    }

    /// Rank `snapshot` as of the clock's current time.
    pub fn rank(&self, snapshot: &AdvisorySnapshot) -> Vec<AdvisoryCard> {
        let cards = prioritize(snapshot, &self.config, self.clock.now());
        debug!(
            incidents = snapshot.incidents.len(),
            rain_gauges = snapshot.rain_gauges.len(),
            alerts = snapshot.alerts.len(),
            cards = cards.len(),
            "Ranked advisories"
        );
        cards
    }

    /// Decode the cached incident, rain gauge and alert datasets and rank them.
    pub fn rank_cached(&self, store: &CacheStore) -> Vec<AdvisoryCard> {
        self.rank(&AdvisorySnapshot::from_store(store))
    }
}

impl std::fmt::Debug for Prioritizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prioritizer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
