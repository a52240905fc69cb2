//! Failure taxonomy for a single feed fetch.
//!
//! # Design
//! Every way a fetch can end badly resolves to one `FeedError` variant, and
//! every variant collapses to one of three `FailureKind`s so the presentation
//! layer can show "no connection", "service unreachable", and "bad response"
//! differently. A feature skipped during parsing is not an error at all; it
//! is logged and the batch continues.

use thiserror::Error;

/// Errors produced by the fetch-and-parse pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// No active network path; the request was never attempted.
    #[error("no internet connection")]
    Connectivity,

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The request could not be completed (DNS, refused, reset, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// No response arrived within the configured bound.
    #[error("request timed out")]
    Timeout,

    /// The response body exceeded the in-memory cap.
    #[error("response body exceeds {limit} bytes")]
    BodyTooLarge { limit: u64 },

    /// The body is not JSON or lacks a top-level `features` array.
    #[error("malformed feed: {0}")]
    Parse(String),
}

/// Coarse classification the consumer uses to pick a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Connectivity,
    Network,
    Parse,
}

impl FeedError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FeedError::Connectivity => FailureKind::Connectivity,
            FeedError::HttpStatus { .. }
            | FeedError::Transport(_)
            | FeedError::Timeout
            | FeedError::BodyTooLarge { .. } => FailureKind::Network,
            FeedError::Parse(_) => FailureKind::Parse,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        FeedError::Transport(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        FeedError::Parse(message.into())
    }
}
