//! Discrete fetch outcomes and the view state folded from them.
//!
//! # Design
//! The pipeline is a function from URL to `FetchOutcome`. The presentation
//! layer never keeps ad-hoc flags; it owns a `ViewState` and advances it with
//! `ViewState::apply`, so every screen state is reachable only through an
//! explicit transition.

use crate::error::{FailureKind, FeedError};
use crate::types::EarthquakeRecord;

pub const MSG_NO_EARTHQUAKES: &str = "No earthquakes found";
pub const MSG_NO_CONNECTION: &str = "No internet connection";
pub const MSG_NETWORK: &str = "Unable to reach the earthquake service";
pub const MSG_PARSE: &str = "Received an unexpected response";

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Loading,
    Success(Vec<EarthquakeRecord>),
    EmptyResult,
    Failed(FeedError),
}

impl FetchOutcome {
    /// An empty record list becomes `EmptyResult`, never `Success(vec![])`.
    pub fn from_result(result: Result<Vec<EarthquakeRecord>, FeedError>) -> Self {
        match result {
            Ok(records) if records.is_empty() => FetchOutcome::EmptyResult,
            Ok(records) => FetchOutcome::Success(records),
            Err(err) => FetchOutcome::Failed(err),
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            FetchOutcome::Failed(err) => Some(err.kind()),
            _ => None,
        }
    }

    pub fn records(&self) -> &[EarthquakeRecord] {
        match self {
            FetchOutcome::Success(records) => records,
            _ => &[],
        }
    }
}

/// What the list screen shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub records: Vec<EarthquakeRecord>,
    pub message: Option<&'static str>,
    pub progress_visible: bool,
    pub retry_visible: bool,
    pub reload_visible: bool,
}

impl Default for ViewState {
    /// The screen starts in the loading state.
    fn default() -> Self {
        Self {
            records: Vec::new(),
            message: None,
            progress_visible: true,
            retry_visible: false,
            reload_visible: false,
        }
    }
}

impl ViewState {
    pub fn apply(self, outcome: FetchOutcome) -> Self {
        match outcome {
            FetchOutcome::Loading => Self {
                records: Vec::new(),
                message: None,
                progress_visible: true,
                retry_visible: false,
                reload_visible: self.reload_visible,
            },
            FetchOutcome::Success(records) => Self {
                records,
                message: None,
                progress_visible: false,
                retry_visible: false,
                reload_visible: true,
            },
            FetchOutcome::EmptyResult => Self::blocked(MSG_NO_EARTHQUAKES),
            FetchOutcome::Failed(err) => Self::blocked(failure_message(err.kind())),
        }
    }

    fn blocked(message: &'static str) -> Self {
        Self {
            records: Vec::new(),
            message: Some(message),
            progress_visible: false,
            retry_visible: true,
            reload_visible: false,
        }
    }
}

pub fn failure_message(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::Connectivity => MSG_NO_CONNECTION,
        FailureKind::Network => MSG_NETWORK,
        FailureKind::Parse => MSG_PARSE,
    }
}
