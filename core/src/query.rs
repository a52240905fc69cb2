//! Feed query parameters and URL assembly.
//!
//! Values are passed through verbatim apart from percent-encoding; rejecting
//! a bad magnitude or ordering is the remote service's job.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Public USGS FDSN event endpoint.
pub const USGS_QUERY_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

/// Number of events requested per fetch.
pub const FEED_LIMIT: u32 = 10;

pub const DEFAULT_MIN_MAGNITUDE: &str = "6";
pub const DEFAULT_ORDER_BY: &str = "time";

/// User-configurable part of the query. Both fields are opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedQuery {
    pub min_magnitude: String,
    pub order_by: String,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            min_magnitude: DEFAULT_MIN_MAGNITUDE.to_string(),
            order_by: DEFAULT_ORDER_BY.to_string(),
        }
    }
}

impl FeedQuery {
    pub fn new(min_magnitude: impl Into<String>, order_by: impl Into<String>) -> Self {
        Self {
            min_magnitude: min_magnitude.into(),
            order_by: order_by.into(),
        }
    }

    /// Query parameters in the order they are appended.
    pub fn params(&self) -> [(&'static str, String); 4] {
        [
            ("format", "geojson".to_string()),
            ("limit", FEED_LIMIT.to_string()),
            ("minmag", self.min_magnitude.clone()),
            ("orderby", self.order_by.clone()),
        ]
    }
}

/// Orderings the USGS service accepts, for hosts that want a typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderBy {
    Time,
    TimeAsc,
    Magnitude,
    MagnitudeAsc,
}

impl OrderBy {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderBy::Time => "time",
            OrderBy::TimeAsc => "time-asc",
            OrderBy::Magnitude => "magnitude",
            OrderBy::MagnitudeAsc => "magnitude-asc",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(OrderBy::Time),
            "time-asc" => Ok(OrderBy::TimeAsc),
            "magnitude" => Ok(OrderBy::Magnitude),
            "magnitude-asc" => Ok(OrderBy::MagnitudeAsc),
            other => Err(format!("unknown ordering: {other}")),
        }
    }
}

/// Append the feed parameters to `base`.
///
/// A base that already has a query string gets the parameters appended with
/// `&`. A trailing `?` or `&` is dropped first so no empty pair is produced.
pub fn build_feed_url(base: &str, query: &FeedQuery) -> String {
    let base = base.trim_end_matches(['?', '&']);
    let separator = if base.contains('?') { '&' } else { '?' };

    let pairs: Vec<String> = query
        .params()
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect();

    format!("{base}{separator}{}", pairs.join("&"))
}
