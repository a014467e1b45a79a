//! Addressable configuration keys (`section.key`).
//!
//! Per-dataset threshold sections (`[staleness.<dataset>]`) are dynamic and
//! not listed here; everything with a fixed name is.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::file::{parse_list, parse_value, ConfigError, ConfigFile};
use crate::advisory::{IncidentSeverity, IncidentType};
use crate::staleness::{StalenessThresholds, ThresholdTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    StalenessDefaultStaleMinutes,
    StalenessDefaultOutdatedMinutes,
    AdvisoryRainThreshold15min,
    AdvisoryRainThreshold1hour,
    AdvisoryMaxCards,
    AdvisoryMaxIncidents,
    AdvisoryMaxRainGauges,
    AdvisoryMaxAlerts,
    AdvisoryIncidentSeverities,
    AdvisoryPriorityIncidentTypes,
    HighlightPointTtlSecs,
    HighlightPolygonTtlSecs,
    HighlightBoundsTtlSecs,
    StoreDirectory,
}

impl ConfigKey {
    /// Every key, in file order.
    pub fn all() -> &'static [ConfigKey] {
        use ConfigKey::*;
        &[
            StalenessDefaultStaleMinutes,
            StalenessDefaultOutdatedMinutes,
            AdvisoryRainThreshold15min,
            AdvisoryRainThreshold1hour,
            AdvisoryMaxCards,
            AdvisoryMaxIncidents,
            AdvisoryMaxRainGauges,
            AdvisoryMaxAlerts,
            AdvisoryIncidentSeverities,
            AdvisoryPriorityIncidentTypes,
            HighlightPointTtlSecs,
            HighlightPolygonTtlSecs,
            HighlightBoundsTtlSecs,
            StoreDirectory,
        ]
    }

    pub fn section(&self) -> &'static str {
        use ConfigKey::*;
        match self {
            StalenessDefaultStaleMinutes | StalenessDefaultOutdatedMinutes => "staleness",
            AdvisoryRainThreshold15min
            | AdvisoryRainThreshold1hour
            | AdvisoryMaxCards
            | AdvisoryMaxIncidents
            | AdvisoryMaxRainGauges
            | AdvisoryMaxAlerts
            | AdvisoryIncidentSeverities
            | AdvisoryPriorityIncidentTypes => "advisory",
            HighlightPointTtlSecs | HighlightPolygonTtlSecs | HighlightBoundsTtlSecs => "highlight",
            StoreDirectory => "store",
        }
    }

    pub fn key_name(&self) -> &'static str {
        use ConfigKey::*;
        match self {
            StalenessDefaultStaleMinutes => "default_stale_minutes",
            StalenessDefaultOutdatedMinutes => "default_outdated_minutes",
            AdvisoryRainThreshold15min => "rain_threshold_15min",
            AdvisoryRainThreshold1hour => "rain_threshold_1hour",
            AdvisoryMaxCards => "max_cards",
            AdvisoryMaxIncidents => "max_incidents",
            AdvisoryMaxRainGauges => "max_rain_gauges",
            AdvisoryMaxAlerts => "max_alerts",
            AdvisoryIncidentSeverities => "incident_severities",
            AdvisoryPriorityIncidentTypes => "priority_incident_types",
            HighlightPointTtlSecs => "point_ttl_secs",
            HighlightPolygonTtlSecs => "polygon_ttl_secs",
            HighlightBoundsTtlSecs => "bounds_ttl_secs",
            StoreDirectory => "directory",
        }
    }

    /// `section.key` form.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value rendered as it would appear in the file. Empty if unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        use ConfigKey::*;
        let defaults = config.staleness.default_thresholds();
        match self {
            StalenessDefaultStaleMinutes => defaults.stale_minutes().to_string(),
            StalenessDefaultOutdatedMinutes => defaults.outdated_minutes().to_string(),
            AdvisoryRainThreshold15min => config.advisory.rain_threshold_15min.to_string(),
            AdvisoryRainThreshold1hour => config.advisory.rain_threshold_1hour.to_string(),
            AdvisoryMaxCards => config.advisory.max_cards.to_string(),
            AdvisoryMaxIncidents => config.advisory.max_incidents.to_string(),
            AdvisoryMaxRainGauges => config.advisory.max_rain_gauges.to_string(),
            AdvisoryMaxAlerts => config.advisory.max_alerts.to_string(),
            AdvisoryIncidentSeverities => join(config.advisory.incident_severities.iter()),
            AdvisoryPriorityIncidentTypes => join(config.advisory.priority_incident_types.iter()),
            HighlightPointTtlSecs => config.highlight.point_ttl.as_secs().to_string(),
            HighlightPolygonTtlSecs => config.highlight.polygon_ttl.as_secs().to_string(),
            HighlightBoundsTtlSecs => config.highlight.bounds_ttl.as_secs().to_string(),
            StoreDirectory => config
                .store_directory
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Parse `value` and apply it to `config`.
    ///
    /// Setting one half of the default staleness pair is validated against
    /// the other half.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        use ConfigKey::*;
        let (section, key) = (self.section(), self.key_name());
        let defaults = config.staleness.default_thresholds();

        match self {
            StalenessDefaultStaleMinutes | StalenessDefaultOutdatedMinutes => {
                let minutes: u32 = parse_value(section, key, value)?;
                let pair = if *self == StalenessDefaultStaleMinutes {
                    StalenessThresholds::new(minutes, defaults.outdated_minutes())
                } else {
                    StalenessThresholds::new(defaults.stale_minutes(), minutes)
                }
                .map_err(|source| ConfigError::Thresholds {
                    section: section.to_string(),
                    source,
                })?;
                config.staleness = rebase(&config.staleness, pair);
            }
            AdvisoryRainThreshold15min => {
                config.advisory.rain_threshold_15min = parse_millimetres(section, key, value)?
            }
            AdvisoryRainThreshold1hour => {
                config.advisory.rain_threshold_1hour = parse_millimetres(section, key, value)?
            }
            AdvisoryMaxCards => {
                let max: usize = parse_value(section, key, value)?;
                if max == 0 {
                    return Err(ConfigError::invalid(section, key, value, "must be at least 1"));
                }
                config.advisory.max_cards = max;
            }
            AdvisoryMaxIncidents => config.advisory.max_incidents = parse_value(section, key, value)?,
            AdvisoryMaxRainGauges => {
                config.advisory.max_rain_gauges = parse_value(section, key, value)?
            }
            AdvisoryMaxAlerts => config.advisory.max_alerts = parse_value(section, key, value)?,
            AdvisoryIncidentSeverities => {
                config.advisory.incident_severities =
                    parse_list::<IncidentSeverity>(section, key, value)?
            }
            AdvisoryPriorityIncidentTypes => {
                config.advisory.priority_incident_types =
                    parse_list::<IncidentType>(section, key, value)?
            }
            HighlightPointTtlSecs => config.highlight.point_ttl = parse_ttl(section, key, value)?,
            HighlightPolygonTtlSecs => config.highlight.polygon_ttl = parse_ttl(section, key, value)?,
            HighlightBoundsTtlSecs => config.highlight.bounds_ttl = parse_ttl(section, key, value)?,
            StoreDirectory => {
                let trimmed = value.trim();
                config.store_directory = if trimmed.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(trimmed))
                };
            }
        }
        Ok(())
    }
}

impl FromStr for ConfigKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| format!("unknown configuration key '{}'", s))
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.section(), self.key_name())
    }
}

/// Same overrides, new fallback pair.
fn rebase(table: &ThresholdTable, default: StalenessThresholds) -> ThresholdTable {
    table
        .overrides()
        .into_iter()
        .fold(ThresholdTable::with_default(default), |t, (key, pair)| t.with(key, pair))
}

fn join<T: std::fmt::Display>(items: impl Iterator<Item = T>) -> String {
    items.map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
}

fn parse_millimetres(section: &str, key: &str, value: &str) -> Result<f64, ConfigError> {
    let mm: f64 = parse_value(section, key, value)?;
    if !mm.is_finite() || mm < 0.0 {
        return Err(ConfigError::invalid(
            section,
            key,
            value,
            "must be a non-negative number",
        ));
    }
    Ok(mm)
}

fn parse_ttl(section: &str, key: &str, value: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = parse_value(section, key, value)?;
    if secs == 0 {
        return Err(ConfigError::invalid(section, key, value, "must be at least 1 second"));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names_round_trip() {
        for key in ConfigKey::all() {
            assert_eq!(key.name().parse::<ConfigKey>(), Ok(*key));
        }
        assert!("advisory.nope".parse::<ConfigKey>().is_err());
    }

    #[test]
    fn test_get_defaults() {
        let config = ConfigFile::default();
        assert_eq!(ConfigKey::AdvisoryMaxCards.get(&config), "5");
        assert_eq!(ConfigKey::StalenessDefaultOutdatedMinutes.get(&config), "15");
        assert_eq!(ConfigKey::HighlightPointTtlSecs.get(&config), "15");
        assert_eq!(
            ConfigKey::AdvisoryIncidentSeverities.get(&config),
            "high, critical"
        );
        assert_eq!(
            ConfigKey::AdvisoryPriorityIncidentTypes.get(&config),
            "flooding, landslide, fire, accident"
        );
        assert_eq!(ConfigKey::StoreDirectory.get(&config), "");
    }

    #[test]
    fn test_set_values() {
        let mut config = ConfigFile::default();
        ConfigKey::AdvisoryRainThreshold15min
            .set(&mut config, "7.5")
            .unwrap();
        ConfigKey::AdvisoryIncidentSeverities
            .set(&mut config, "medium,high , critical")
            .unwrap();
        ConfigKey::HighlightBoundsTtlSecs.set(&mut config, "45").unwrap();

        assert_eq!(config.advisory.rain_threshold_15min, 7.5);
        assert_eq!(config.advisory.incident_severities.len(), 3);
        assert_eq!(config.highlight.bounds_ttl, Duration::from_secs(45));
    }

    #[test]
    fn test_set_staleness_validates_pair() {
        let mut config = ConfigFile::default();
        let err = ConfigKey::StalenessDefaultStaleMinutes
            .set(&mut config, "20")
            .unwrap_err();
        assert!(err.to_string().contains("staleness"));

        ConfigKey::StalenessDefaultOutdatedMinutes
            .set(&mut config, "30")
            .unwrap();
        ConfigKey::StalenessDefaultStaleMinutes
            .set(&mut config, "20")
            .unwrap();
        assert_eq!(
            config.staleness.default_thresholds(),
            StalenessThresholds::new(20, 30).unwrap()
        );
    }

    #[test]
    fn test_set_keeps_dataset_overrides() {
        let mut config = ConfigFile::default();
        let incidents = StalenessThresholds::new(5, 10).unwrap();
        config.staleness.set("incidents", incidents);

        ConfigKey::StalenessDefaultOutdatedMinutes
            .set(&mut config, "60")
            .unwrap();
        assert_eq!(config.staleness.get("incidents"), incidents);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = ConfigFile::default();
        assert!(ConfigKey::AdvisoryMaxCards.set(&mut config, "0").is_err());
        assert!(ConfigKey::AdvisoryMaxCards.set(&mut config, "many").is_err());
        assert!(ConfigKey::AdvisoryRainThreshold1hour
            .set(&mut config, "-1")
            .is_err());
        assert!(ConfigKey::AdvisoryIncidentSeverities
            .set(&mut config, "high, severe")
            .is_err());
        assert!(ConfigKey::HighlightPointTtlSecs.set(&mut config, "0").is_err());
    }

    #[test]
    fn test_error_names_section_and_key() {
        let mut config = ConfigFile::default();
        let err = ConfigKey::AdvisoryMaxAlerts
            .set(&mut config, "lots")
            .unwrap_err();
        assert!(err.to_string().contains("advisory.max_alerts"));
    }
}
