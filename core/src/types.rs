//! Domain DTOs for the activity backend.
//!
//! # Design
//! These types mirror the backend's JSON but are defined independently of the
//! mock-server crate. The extracted-data and raw-event payloads are opaque to
//! the client and are kept as untyped JSON.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Enriched data extracted from an event by the backend. Opaque here.
pub type EnrichedExtractedInfo = serde_json::Value;

/// Raw captured event data. Opaque here.
pub type EventData = serde_json::Value;

/// A single timestamped activity record returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: String,
    /// ISO-8601 instant, passed through as the backend wrote it.
    pub timestamp: String,
    /// Seconds.
    pub duration: f64,
    pub data: EnrichedExtractedInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<EventData>,
}

/// The `{ "data": ... }` wrapper the backend puts around every payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Input for `/time-range`. Bounds are optional; a `limit` of zero means
/// "unspecified" and is not sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeRangeQuery {
    #[serde(default)]
    pub before: Option<DateTime<Utc>>,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub after: Option<DateTime<Utc>>,
}

impl TimeRangeQuery {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn before(mut self, instant: DateTime<Utc>) -> Self {
        self.before = Some(instant);
        self
    }

    pub fn after(mut self, instant: DateTime<Utc>) -> Self {
        self.after = Some(instant);
        self
    }
}

/// Input for `/single-event`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SingleEventQuery {
    pub id: String,
}

impl SingleEventQuery {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Render an instant as UTC with millisecond precision and a `Z` suffix,
/// e.g. `2024-01-02T03:04:05.000Z`.
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}
