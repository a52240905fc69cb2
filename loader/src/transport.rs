//! Executes core `HttpRequest`s over the network.
//!
//! # Design
//! `Transport` is the seam between the sans-IO core and real sockets. The
//! production implementation wraps a blocking `ureq` agent with a global
//! timeout, so a stalled server ends the fetch instead of hanging it. Tests
//! substitute their own `Transport` to simulate failures.

use std::time::Duration;

use quake_core::{FeedError, HttpRequest, HttpResponse, MAX_FEED_BYTES};

/// Performs one HTTP round-trip.
///
/// Implementations report transport-level problems as network-kind
/// `FeedError`s and hand back every response, whatever its status.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, FeedError>;
}

/// Blocking HTTP transport backed by ureq.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    max_body: u64,
}

impl std::fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqTransport")
            .field("max_body", &self.max_body)
            .finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            agent,
            max_body: MAX_FEED_BYTES,
        }
    }

    #[must_use]
    pub fn with_max_body(mut self, max_body: u64) -> Self {
        self.max_body = max_body;
        self
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, FeedError> {
        let mut call = self.agent.get(&request.url);
        for (key, value) in &request.headers {
            call = call.header(key, value);
        }

        tracing::debug!(url = %request.url, method = request.method.as_str(), "sending request");
        let mut response = call.call().map_err(map_error)?;
        let status = response.status().as_u16();

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .body_mut()
            .with_config()
            .limit(self.max_body)
            .read_to_string();

        let body = match body {
            Ok(body) => body,
            // An error page is only kept for diagnostics; a truncated one is fine.
            Err(err) if !(200..300).contains(&status) => {
                tracing::debug!(status, error = %err, "discarding unreadable error body");
                String::new()
            }
            Err(err) => return Err(map_error(err)),
        };

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn map_error(err: ureq::Error) -> FeedError {
    match err {
        ureq::Error::Timeout(_) => FeedError::Timeout,
        ureq::Error::Io(io) if io.kind() == std::io::ErrorKind::TimedOut => FeedError::Timeout,
        ureq::Error::BodyExceedsLimit(limit) => FeedError::BodyTooLarge { limit },
        other => FeedError::transport(other.to_string()),
    }
}
