//! Stateless request builder and response parser for the earthquake feed.
//!
//! # Design
//! `QuakeClient` holds only a `base_url` and carries no mutable state between
//! calls. A fetch is split into `build_feed_request`, which produces an
//! `HttpRequest`, and `parse_feed_response`, which consumes the
//! `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! the core deterministic and free of I/O dependencies.
//!
//! Parsing is tolerant per feature and strict per document: a feature with a
//! missing or mistyped field is skipped, while a body that is not JSON or has
//! no `features` array fails the whole fetch.

use serde_json::Value;

use crate::error::FeedError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::{build_feed_url, FeedQuery, USGS_QUERY_URL};
use crate::types::{EarthquakeRecord, RawFeature, RawFeed};

/// Event page used when a feature carries an `id` but no `url`.
pub const EVENT_PAGE_BASE: &str = "https://earthquake.usgs.gov/earthquakes/eventpage";

/// Upper bound on a feed body held in memory.
pub const MAX_FEED_BYTES: u64 = 512 * 1024;

/// Synchronous, stateless client for the GeoJSON event feed.
#[derive(Debug, Clone)]
pub struct QuakeClient {
    base_url: String,
}

impl Default for QuakeClient {
    fn default() -> Self {
        Self::new(USGS_QUERY_URL)
    }
}

impl QuakeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_feed_request(&self, query: &FeedQuery) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: build_feed_url(&self.base_url, query),
            headers: vec![(
                "accept".to_string(),
                "application/geo+json, application/json".to_string(),
            )],
        }
    }

    /// Validate the status, then decode the body.
    ///
    /// A non-2xx status is a network failure even if the body happens to be
    /// valid GeoJSON.
    pub fn parse_feed_response(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<EarthquakeRecord>, FeedError> {
        if !response.is_success() {
            return Err(FeedError::HttpStatus {
                status: response.status,
                body: response.body,
            });
        }
        parse_feed_body(&response.body)
    }
}

/// Decode a GeoJSON feed body into records, in feed order.
pub fn parse_feed_body(body: &str) -> Result<Vec<EarthquakeRecord>, FeedError> {
    let feed: RawFeed = serde_json::from_str(body).map_err(|e| FeedError::parse(e.to_string()))?;

    if let Some(metadata) = &feed.metadata {
        tracing::debug!(
            title = metadata.get("title").and_then(serde_json::Value::as_str).unwrap_or(""),
            count = metadata.get("count").and_then(serde_json::Value::as_u64),
            "decoding feed"
        );
    }

    let total = feed.features.len();
    let records: Vec<EarthquakeRecord> = feed
        .features
        .into_iter()
        .enumerate()
        .filter_map(|(index, feature)| match record_from_feature(feature) {
            Ok(record) => Some(record),
            Err(reason) => {
                tracing::debug!(index, reason, "skipping feature");
                None
            }
        })
        .collect();

    if records.len() < total {
        tracing::info!(
            kept = records.len(),
            skipped = total - records.len(),
            "feed contained malformed features"
        );
    }

    Ok(records)
}

/// Build one record, or name the field that made the feature unusable.
fn record_from_feature(feature: Value) -> Result<EarthquakeRecord, &'static str> {
    if !feature.is_object() {
        return Err("feature is not an object");
    }
    let feature: RawFeature = serde_json::from_value(feature)
        .map_err(|_| "properties missing or not an object")?;
    let props = feature.properties;

    let magnitude = props
        .mag
        .as_ref()
        .and_then(Value::as_f64)
        .ok_or("mag missing or not a number")?;

    let location = props
        .place
        .as_ref()
        .and_then(Value::as_str)
        .ok_or("place missing or not a string")?
        .to_string();

    let occurred_at_millis = props
        .time
        .as_ref()
        .and_then(epoch_millis)
        .ok_or("time missing or not an integer")?;

    let detail_url = match props.url.as_ref() {
        Some(Value::String(url)) if !url.is_empty() => url.clone(),
        Some(Value::String(_)) | Some(Value::Null) | None => feature
            .id
            .as_ref()
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(|id| format!("{EVENT_PAGE_BASE}/{id}"))
            .ok_or("no url and no string id to build one from")?,
        Some(_) => return Err("url is not a string"),
    };

    Ok(EarthquakeRecord {
        magnitude,
        location,
        occurred_at_millis,
        detail_url,
    })
}

/// Accept integers and integral floats; reject fractions and non-numbers.
fn epoch_millis(value: &Value) -> Option<i64> {
    if let Some(millis) = value.as_i64() {
        return Some(millis);
    }
    let float = value.as_f64()?;
    if float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64 {
        Some(float as i64)
    } else {
        None
    }
}
