//! One complete fetch: connectivity check, request, round-trip, parse.

use std::time::Duration;

use quake_core::{EarthquakeRecord, FeedError, FeedQuery, QuakeClient};

use crate::config::Config;
use crate::connectivity::{AlwaysOnline, Connectivity, HostProbe, NetworkPath};
use crate::transport::{Transport, UreqTransport};

/// Bound on the opt-in TCP connect to the endpoint.
const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

pub struct FeedPipeline<T = UreqTransport, C = Box<dyn Connectivity>> {
    client: QuakeClient,
    transport: T,
    connectivity: C,
}

impl FeedPipeline {
    /// Production pipeline for a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        let connectivity = connectivity_for(config);
        FeedPipeline::new(
            QuakeClient::new(&config.endpoint),
            UreqTransport::new(config.timeout()),
            connectivity,
        )
    }
}

fn connectivity_for(config: &Config) -> Box<dyn Connectivity> {
    if !config.connectivity_check {
        return Box::new(AlwaysOnline);
    }
    let check: Option<Box<dyn Connectivity>> = if config.strict_endpoint_check {
        HostProbe::for_url(&config.endpoint, PROBE_TIMEOUT.min(config.timeout()))
            .map(|host| Box::new(host) as Box<dyn Connectivity>)
    } else {
        NetworkPath::for_url(&config.endpoint).map(|path| Box::new(path) as Box<dyn Connectivity>)
    };
    check.unwrap_or_else(|| Box::new(AlwaysOnline))
}

impl<T: Transport, C: Connectivity> FeedPipeline<T, C> {
    pub fn new(client: QuakeClient, transport: T, connectivity: C) -> Self {
        Self {
            client,
            transport,
            connectivity,
        }
    }

    pub fn client(&self) -> &QuakeClient {
        &self.client
    }

    /// Blocking. A skipped feature is not an error; an empty `Ok` is a
    /// successful fetch with no events.
    pub fn fetch(&self, query: &FeedQuery) -> Result<Vec<EarthquakeRecord>, FeedError> {
        if !self.connectivity.is_connected() {
            tracing::warn!(endpoint = self.client.base_url(), "no network connectivity");
            return Err(FeedError::Connectivity);
        }

        let request = self.client.build_feed_request(query);
        tracing::info!(url = %request.url, "fetching earthquake feed");

        let result = self
            .transport
            .execute(&request)
            .and_then(|response| self.client.parse_feed_response(response));

        match &result {
            Ok(records) => tracing::info!(count = records.len(), "feed fetched"),
            Err(err) => tracing::warn!(kind = ?err.kind(), error = %err, "feed fetch failed"),
        }
        result
    }
}
