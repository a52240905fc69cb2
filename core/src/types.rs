//! Domain values and the GeoJSON wire shapes they are decoded from.
//!
//! # Design
//! `EarthquakeRecord` is the only type the consumer sees. The `Raw*` wire
//! structs are deliberately loose (every field optional, values kept as
//! `serde_json::Value` where the feed is known to vary) so one bad feature
//! can be skipped without failing the whole document.

use serde::{Deserialize, Serialize};

/// One earthquake, fully populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarthquakeRecord {
    pub magnitude: f64,
    pub location: String,
    /// Milliseconds since the Unix epoch, UTC.
    pub occurred_at_millis: i64,
    pub detail_url: String,
}

/// Top-level feed document. Only `features` is mandatory; `metadata` is
/// read for logging and may hold anything.
#[derive(Debug, Deserialize)]
pub(crate) struct RawFeed {
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    pub features: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFeature {
    /// Only consulted when `properties.url` is missing.
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub properties: RawProperties,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawProperties {
    #[serde(default)]
    pub mag: Option<serde_json::Value>,
    #[serde(default)]
    pub place: Option<serde_json::Value>,
    #[serde(default)]
    pub time: Option<serde_json::Value>,
    #[serde(default)]
    pub url: Option<serde_json::Value>,
}
