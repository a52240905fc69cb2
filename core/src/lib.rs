//! Sans-IO core for the earthquake feed client.
//!
//! # Overview
//! Builds the `HttpRequest` for a USGS-style GeoJSON event query and parses
//! the `HttpResponse` into `EarthquakeRecord`s without touching the network
//! (host-does-IO pattern). The caller executes the round-trip, which keeps
//! the core deterministic and lets a mobile host reuse it through the C ABI.
//!
//! # Design
//! - `QuakeClient` is stateless; it holds only `base_url`.
//! - A fetch is `build_feed_request` (query builder) followed by
//!   `parse_feed_response` (status check and GeoJSON decode).
//! - Failures are a single `FeedError` enum whose `kind()` separates
//!   connectivity, network, and parse problems.
//! - Presentation helpers (`location`, `magnitude`, `display`, `outcome`) are
//!   pure functions so any UI can share them.

pub mod client;
pub mod display;
pub mod error;
pub mod http;
pub mod location;
pub mod magnitude;
pub mod outcome;
pub mod query;
pub mod types;

pub use client::{parse_feed_body, QuakeClient, MAX_FEED_BYTES};
pub use error::{FailureKind, FeedError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use location::{split_location, LocationParts};
pub use magnitude::MagnitudeBucket;
pub use outcome::{FetchOutcome, ViewState};
pub use query::{build_feed_url, FeedQuery, OrderBy, USGS_QUERY_URL};
pub use types::EarthquakeRecord;
