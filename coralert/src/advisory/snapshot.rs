//! Lenient decoding of cached advisory payloads.
//!
//! The cache stores response bodies verbatim, so decoding happens at read
//! time. Payloads may be a bare JSON array or the backend envelope
//! `{"success": true, "data": [...], ...}`. Items that don't decode are
//! skipped; a payload that isn't JSON at all yields nothing.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::model::{ActiveAlert, AlertSeverity, Incident, IncidentSeverity, IncidentType, RainGauge};
use crate::cache::CacheStore;
use crate::clock::parse_timestamp;
use crate::dataset::Dataset;
use crate::geo::LatLng;

/// Everything the prioritizer ranks in one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvisorySnapshot {
    pub incidents: Vec<Incident>,
    pub rain_gauges: Vec<RainGauge>,
    pub alerts: Vec<ActiveAlert>,
}

impl AdvisorySnapshot {
    /// Decode the incidents, rain gauge and alerts inbox datasets from `store`.
    ///
    /// Missing datasets contribute nothing.
    pub fn from_store(store: &CacheStore) -> Self {
        let payload = |dataset: Dataset| {
            store
                .get(dataset.key())
                .map(|entry| entry.payload.clone())
                .unwrap_or_default()
        };

        Self {
            incidents: decode_incidents(&payload(Dataset::Incidents)),
            rain_gauges: decode_rain_gauges(&payload(Dataset::RainGauges)),
            alerts: decode_alerts(&payload(Dataset::AlertsInbox)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.incidents.is_empty() && self.rain_gauges.is_empty() && self.alerts.is_empty()
    }
}

/// Decode an incidents payload.
pub fn decode_incidents(payload: &str) -> Vec<Incident> {
    decode_items(payload, "incidents", |raw: RawIncident| {
        Some(Incident {
            id: id_string(&raw.id)?,
            incident_type: raw
                .kind
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or(IncidentType::Other),
            severity: raw
                .severity
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or(IncidentSeverity::Medium),
            title: raw.title.filter(|t| !t.trim().is_empty()),
            description: raw.description,
            location: raw.geometry.and_then(|g| first_position(&g.coordinates)),
        })
    })
}

/// Decode a rain gauges payload.
pub fn decode_rain_gauges(payload: &str) -> Vec<RainGauge> {
    decode_items(payload, "rain_gauges", |raw: RawRainGauge| {
        let reading = raw.last_reading.unwrap_or_default();
        let id = id_string(&raw.id)?;
        let location = match (raw.latitude, raw.longitude) {
            (Some(lat), Some(lng)) => Some(LatLng::new(lat, lng)).filter(LatLng::is_valid),
            _ => None,
        };

        Some(RainGauge {
            name: raw.name.unwrap_or_else(|| id.clone()),
            id,
            value_15min: reading
                .accumulated_15min
                .or(raw.value_15min)
                .unwrap_or(0.0),
            accumulated_1h: reading.accumulated_1h.or(raw.accumulated_1h),
            location,
        })
    })
}

/// Decode an alerts inbox payload.
///
/// An alert whose `expires_at` is present but unparseable is skipped rather
/// than treated as never expiring.
pub fn decode_alerts(payload: &str) -> Vec<ActiveAlert> {
    decode_items(payload, "alerts", |raw: RawAlert| {
        let expires_at = match raw.expires_at.as_deref() {
            Some(ts) => Some(parse_timestamp(ts)?),
            None => None,
        };

        Some(ActiveAlert {
            id: id_string(&raw.id)?,
            title: raw.title.unwrap_or_default(),
            body: raw.body.unwrap_or_default(),
            severity: raw
                .severity
                .as_deref()
                .map(AlertSeverity::parse_lenient)
                .unwrap_or_default(),
            expires_at,
            location: None,
        })
    })
}

fn decode_items<R, T>(payload: &str, what: &str, convert: impl Fn(R) -> Option<T>) -> Vec<T>
where
    R: for<'de> Deserialize<'de>,
{
    let items = match serde_json::from_str::<Value>(payload) {
        Ok(Value::Array(items)) => items,
        Ok(Value::Object(mut envelope)) => match envelope.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<R>(item).ok())
        .filter_map(&convert)
        .collect();

    if decoded.len() < total {
        debug!(
            what,
            total,
            skipped = total - decoded.len(),
            "Skipped undecodable advisory items"
        );
    }
    decoded
}

/// Ids arrive as strings from most feeds and as numbers from some.
fn id_string(id: &Value) -> Option<String> {
    match id {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First `[lon, lat]` position found in a GeoJSON coordinates value.
///
/// Handles Point directly and descends into LineString, Polygon and the
/// Multi* variants by following the first element.
fn first_position(coordinates: &Value) -> Option<LatLng> {
    let items = coordinates.as_array()?;
    match items.first()? {
        Value::Number(_) => {
            let position: Vec<f64> = items.iter().filter_map(Value::as_f64).collect();
            LatLng::from_geojson(&position)
        }
        nested => first_position(nested),
    }
}

#[derive(Deserialize)]
struct RawIncident {
    id: Value,
    #[serde(rename = "type")]
    kind: Option<String>,
    severity: Option<String>,
    title: Option<String>,
    description: Option<String>,
    geometry: Option<RawGeometry>,
}

#[derive(Deserialize)]
struct RawGeometry {
    coordinates: Value,
}

#[derive(Deserialize)]
struct RawRainGauge {
    id: Value,
    name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    last_reading: Option<RawReading>,
    value_15min: Option<f64>,
    accumulated_1h: Option<f64>,
}

#[derive(Deserialize, Default)]
struct RawReading {
    accumulated_15min: Option<f64>,
    accumulated_1h: Option<f64>,
}

#[derive(Deserialize)]
struct RawAlert {
    id: Value,
    title: Option<String>,
    body: Option<String>,
    severity: Option<String>,
    expires_at: Option<String>,
}
