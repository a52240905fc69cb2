//! Single-flight feed loading with cancellation.
//!
//! # Design
//! At most one load is live. Starting a load cancels the previous one and
//! bumps a generation counter; a result that comes back for an older
//! generation, or after cancellation, is dropped instead of delivered. The
//! blocking pipeline runs on the blocking pool so a hung socket never stalls
//! the runtime; its own timeout eventually frees the thread.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use quake_core::{FeedError, FeedQuery, FetchOutcome};
use tokio_util::sync::CancellationToken;

use crate::connectivity::Connectivity;
use crate::fetch::FeedPipeline;
use crate::transport::{Transport, UreqTransport};

struct Slot {
    generation: u64,
    token: CancellationToken,
}

pub struct FeedLoader<T = UreqTransport, C = Box<dyn Connectivity>> {
    pipeline: Arc<FeedPipeline<T, C>>,
    slot: Mutex<Slot>,
}

impl<T, C> FeedLoader<T, C>
where
    T: Transport + 'static,
    C: Connectivity + 'static,
{
    pub fn new(pipeline: FeedPipeline<T, C>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            slot: Mutex::new(Slot {
                generation: 0,
                token: CancellationToken::new(),
            }),
        }
    }

    /// Run one fetch, superseding any load still in flight.
    ///
    /// Returns `None` when this load was itself superseded or cancelled; the
    /// caller must then leave its view state alone.
    pub async fn load(&self, query: FeedQuery) -> Option<FetchOutcome> {
        let (generation, token) = self.begin();
        tracing::debug!(generation, "load started");

        let pipeline = Arc::clone(&self.pipeline);
        let task = tokio::task::spawn_blocking(move || pipeline.fetch(&query));

        let joined = tokio::select! {
            joined = task => joined,
            _ = token.cancelled() => {
                tracing::debug!(generation, "load cancelled");
                return None;
            }
        };

        let result = joined.unwrap_or_else(|err| {
            tracing::error!(generation, error = %err, "fetch task failed");
            Err(FeedError::transport(format!("fetch task failed: {err}")))
        });

        if token.is_cancelled() || self.generation() != generation {
            tracing::debug!(generation, "discarding stale result");
            return None;
        }
        Some(FetchOutcome::from_result(result))
    }

    /// Cancel the in-flight load, if any. Its result will never be delivered.
    pub fn cancel(&self) {
        self.lock().token.cancel();
    }

    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    fn begin(&self) -> (u64, CancellationToken) {
        let mut slot = self.lock();
        slot.token.cancel();
        slot.generation += 1;
        slot.token = CancellationToken::new();
        (slot.generation, slot.token.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        // Slot holds no invariants a panic could break.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use quake_core::{FailureKind, HttpRequest, HttpResponse, QuakeClient, ViewState};

    use crate::connectivity::AlwaysOnline;

    const FEED: &str = r#"{"features":[{"id":"a","properties":
        {"mag":6.4,"place":"Somewhere","time":5,"url":"https://e.test/a"}}]}"#;

    /// Answers after a delay taken from the `minmag` value, in milliseconds.
    struct Delayed;

    impl Transport for Delayed {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, FeedError> {
            let millis = request
                .url
                .split("minmag=")
                .nth(1)
                .and_then(|rest| rest.split('&').next())
                .and_then(|value| value.parse().ok())
                .unwrap_or(0);
            std::thread::sleep(Duration::from_millis(millis));
            Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: FEED.to_string(),
            })
        }
    }

    struct Offline;

    impl Connectivity for Offline {
        fn is_connected(&self) -> bool {
            false
        }
    }

    fn loader() -> Arc<FeedLoader<Delayed, AlwaysOnline>> {
        crate::logging::init_test_logging();
        let pipeline = FeedPipeline::new(QuakeClient::default(), Delayed, AlwaysOnline);
        Arc::new(FeedLoader::new(pipeline))
    }

    fn after(millis: u32) -> FeedQuery {
        FeedQuery::new(millis.to_string(), "time")
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn single_load_delivers_outcome() {
        let loader = loader();
        let outcome = loader.load(after(0)).await.unwrap();
        assert_eq!(outcome.records().len(), 1);
        assert_eq!(loader.generation(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn newer_load_supersedes_older() {
        let loader = loader();
        let first = tokio::spawn({
            let loader = Arc::clone(&loader);
            async move { loader.load(after(300)).await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;

        let second = loader.load(after(0)).await;
        assert!(matches!(second, Some(FetchOutcome::Success(_))));
        assert_eq!(first.await.unwrap(), None);
        assert_eq!(loader.generation(), 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn cancel_drops_in_flight_result() {
        let loader = loader();
        let pending = tokio::spawn({
            let loader = Arc::clone(&loader);
            async move { loader.load(after(300)).await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        loader.cancel();
        assert_eq!(pending.await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn load_after_cancel_still_works() {
        let loader = loader();
        loader.cancel();
        assert!(loader.load(after(0)).await.is_some());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn offline_is_connectivity_failure() {
        let pipeline = FeedPipeline::new(QuakeClient::default(), Delayed, Offline);
        let loader = FeedLoader::new(pipeline);
        let outcome = loader.load(after(0)).await.unwrap();
        assert_eq!(outcome.failure_kind(), Some(FailureKind::Connectivity));

        let state = ViewState::default().apply(outcome);
        assert_eq!(state.message, Some("No internet connection"));
        assert!(state.retry_visible);
    }
}
