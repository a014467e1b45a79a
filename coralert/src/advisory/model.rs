//! Typed advisory inputs and output cards.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::LatLng;
use crate::palette::ColorKey;

/// Incident severity, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IncidentSeverity {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl IncidentSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl FromStr for IncidentSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(format!("unknown incident severity '{}'", other)),
        }
    }
}

impl std::fmt::Display for IncidentSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Incident category as reported by the operations center.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IncidentType {
    Traffic,
    #[serde(alias = "flood")]
    Flooding,
    Landslide,
    Fire,
    Accident,
    RoadWork,
    Event,
    Utility,
    WeatherAlert,
    #[default]
    Other,
}

impl IncidentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Traffic => "traffic",
            Self::Flooding => "flooding",
            Self::Landslide => "landslide",
            Self::Fire => "fire",
            Self::Accident => "accident",
            Self::RoadWork => "road_work",
            Self::Event => "event",
            Self::Utility => "utility",
            Self::WeatherAlert => "weather_alert",
            Self::Other => "other",
        }
    }

    /// Human-readable label, used when an incident has no title.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Traffic => "Traffic",
            Self::Flooding => "Flooding",
            Self::Landslide => "Landslide",
            Self::Fire => "Fire",
            Self::Accident => "Accident",
            Self::RoadWork => "Road work",
            Self::Event => "Event",
            Self::Utility => "Utility outage",
            Self::WeatherAlert => "Weather alert",
            Self::Other => "Incident",
        }
    }
}

impl FromStr for IncidentType {
    type Err = String;

    /// Accepts the wire names plus `flood` as a short form of `flooding`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "traffic" => Ok(Self::Traffic),
            "flood" | "flooding" => Ok(Self::Flooding),
            "landslide" => Ok(Self::Landslide),
            "fire" => Ok(Self::Fire),
            "accident" => Ok(Self::Accident),
            "road_work" => Ok(Self::RoadWork),
            "event" => Ok(Self::Event),
            "utility" => Ok(Self::Utility),
            "weather_alert" => Ok(Self::WeatherAlert),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown incident type '{}'", other)),
        }
    }
}

impl std::fmt::Display for IncidentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of an operator-issued alert, ordered from least to most urgent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    #[default]
    Info,
    Alert,
    Emergency,
}

impl AlertSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Alert => "alert",
            Self::Emergency => "emergency",
        }
    }

    pub(crate) fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "emergency" => Self::Emergency,
            "alert" => Self::Alert,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    pub incident_type: IncidentType,
    pub severity: IncidentSeverity,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<LatLng>,
}

impl Incident {
    pub fn new(id: impl Into<String>, incident_type: IncidentType, severity: IncidentSeverity) -> Self {
        Self {
            id: id.into(),
            incident_type,
            severity,
            title: None,
            description: None,
            location: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_location(mut self, location: LatLng) -> Self {
        self.location = Some(location);
        self
    }
}

/// A rain gauge station and its latest accumulations (mm).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RainGauge {
    pub id: String,
    pub name: String,
    pub value_15min: f64,
    pub accumulated_1h: Option<f64>,
    pub location: Option<LatLng>,
}

impl RainGauge {
    pub fn new(id: impl Into<String>, name: impl Into<String>, value_15min: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value_15min,
            accumulated_1h: None,
            location: None,
        }
    }

    pub fn with_accumulated_1h(mut self, mm: f64) -> Self {
        self.accumulated_1h = Some(mm);
        self
    }

    pub fn with_location(mut self, location: LatLng) -> Self {
        self.location = Some(location);
        self
    }

    /// One-hour accumulation, falling back to the 15-minute value.
    pub fn effective_1h(&self) -> f64 {
        self.accumulated_1h.unwrap_or(self.value_15min)
    }
}

/// An alert from the user's inbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveAlert {
    pub id: String,
    pub title: String,
    pub body: String,
    pub severity: AlertSeverity,
    /// `None` means the alert never expires.
    pub expires_at: Option<DateTime<Utc>>,
    pub location: Option<LatLng>,
}

impl ActiveAlert {
    pub fn new(id: impl Into<String>, title: impl Into<String>, severity: AlertSeverity) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: String::new(),
            severity,
            expires_at: None,
            location: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn expiring_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Whether the alert is still in force at `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map_or(true, |expires| expires > now)
    }
}

/// Rain intensity bucket for a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RainLevel {
    VeryStrong,
    Strong,
    Moderate,
}

impl RainLevel {
    /// Bucket a reading. Levels are fixed regardless of the filter thresholds.
    pub fn classify(value_15min: f64, accumulated_1h: f64) -> Self {
        if value_15min >= 25.0 || accumulated_1h >= 50.0 {
            RainLevel::VeryStrong
        } else if value_15min >= 10.0 || accumulated_1h >= 25.0 {
            RainLevel::Strong
        } else {
            RainLevel::Moderate
        }
    }

    pub fn priority(&self) -> u8 {
        match self {
            RainLevel::VeryStrong => 3,
            RainLevel::Strong => 4,
            RainLevel::Moderate => 5,
        }
    }

    pub fn color_key(&self) -> ColorKey {
        match self {
            RainLevel::VeryStrong => ColorKey::VeryStrongRain,
            RainLevel::Strong => ColorKey::StrongRain,
            RainLevel::Moderate => ColorKey::ModerateRain,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RainLevel::VeryStrong => "Very strong rain",
            RainLevel::Strong => "Strong rain",
            RainLevel::Moderate => "Moderate rain",
        }
    }
}

/// What a card was built from, with the fields ranking depended on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardSource {
    Incident {
        incident_type: IncidentType,
        severity: IncidentSeverity,
    },
    RainGauge {
        level: RainLevel,
        value_15min: f64,
        accumulated_1h: f64,
    },
    Alert {
        severity: AlertSeverity,
    },
}

impl CardSource {
    pub fn kind(&self) -> &'static str {
        match self {
            CardSource::Incident { .. } => "incident",
            CardSource::RainGauge { .. } => "rain_gauge",
            CardSource::Alert { .. } => "alert",
        }
    }
}

/// A ranked, user-facing advisory. Lower `priority` sorts first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryCard {
    /// Id of the incident, gauge or alert the card was built from.
    pub id: String,
    pub title: String,
    pub description: String,
    pub location: Option<LatLng>,
    pub priority: u8,
    pub color_key: ColorKey,
    pub source: CardSource,
}
