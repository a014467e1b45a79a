//! Cache entry model and its persisted form.
//!
//! # Persisted Format
//!
//! Each entry is stored in the backend as one JSON object:
//!
//! ```json
//! {
//!   "data": "<opaque payload string>",
//!   "cachedAt": "2024-03-01T12:00:00Z",
//!   "source": "api",
//!   "bbox": {"north": -22.7, "south": -23.1, "east": -43.1, "west": -43.8},
//!   "etag": "W/\"abc\""
//! }
//! ```
//!
//! `source`, `bbox` and `etag` are omitted when absent. `cachedAt` is written
//! as RFC 3339 with full sub-second precision so the round trip is lossless;
//! on read, timestamps without an offset are accepted and taken as UTC.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::geo::BoundingBox;

/// Where the payload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSource {
    /// Fresh response from the backend API.
    Api,
    /// Last-known-good data the backend served because a provider failed.
    Fallback,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Api => "api",
            DataSource::Fallback => "fallback",
        }
    }

    /// Parse the persisted string form. Unknown values yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "api" => Some(DataSource::Api),
            "fallback" => Some(DataSource::Fallback),
            _ => None,
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional metadata recorded alongside a payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryMeta {
    pub source: Option<DataSource>,
    pub bbox: Option<BoundingBox>,
    pub etag: Option<String>,
}

impl EntryMeta {
    /// Metadata for a plain API response.
    pub fn api() -> Self {
        Self {
            source: Some(DataSource::Api),
            ..Self::default()
        }
    }

    pub fn with_source(mut self, source: DataSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    pub fn with_etag(mut self, etag: impl Into<String>) -> Self {
        self.etag = Some(etag.into());
        self
    }
}

/// A cached dataset snapshot.
///
/// Entries are immutable once created; the store swaps whole entries.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// Dataset key this entry belongs to.
    pub key: String,
    /// Opaque payload, usually the JSON body the backend returned.
    pub payload: String,
    /// When the entry was stored.
    pub cached_at: DateTime<Utc>,
    pub source: Option<DataSource>,
    pub bbox: Option<BoundingBox>,
    pub etag: Option<String>,
}

impl CacheEntry {
    /// Build an entry stamped at `cached_at`.
    pub fn new(
        key: impl Into<String>,
        payload: impl Into<String>,
        cached_at: DateTime<Utc>,
        meta: EntryMeta,
    ) -> Self {
        Self {
            key: key.into(),
            payload: payload.into(),
            cached_at,
            source: meta.source,
            bbox: meta.bbox,
            etag: meta.etag,
        }
    }

    /// Whole minutes elapsed since the entry was stored.
    ///
    /// Entries stamped in the future (clock skew) count as age 0.
    pub fn age_minutes(&self, now: DateTime<Utc>) -> u64 {
        (now - self.cached_at).num_minutes().max(0) as u64
    }

    /// Decode the payload as JSON, or `None` if it doesn't fit `T`.
    pub fn payload_json<T: DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_str(&self.payload).ok()
    }

    /// Serialize into the persisted JSON form.
    pub fn to_persisted(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&PersistedEntry {
            data: self.payload.clone(),
            cached_at: self.cached_at,
            source: self.source.map(|s| s.as_str().to_string()),
            bbox: self.bbox,
            etag: self.etag.clone(),
        })
    }

    /// Parse the persisted JSON form.
    pub fn from_persisted(key: &str, raw: &str) -> Result<Self, serde_json::Error> {
        let persisted: PersistedEntry = serde_json::from_str(raw)?;
        Ok(Self {
            key: key.to_string(),
            payload: persisted.data,
            cached_at: persisted.cached_at,
            source: persisted.source.as_deref().and_then(DataSource::parse),
            bbox: persisted.bbox,
            etag: persisted.etag,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedEntry {
    data: String,
    #[serde(with = "iso8601")]
    cached_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bbox: Option<BoundingBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    etag: Option<String>,
}

mod iso8601 {
    use super::*;

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        crate::clock::parse_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{}'", raw)))
    }
}
