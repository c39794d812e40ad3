//! Abstract random-integer service seam.
//!
//! Both remote clients (plain HTTP and JSON-RPC) implement the
//! [`RandomService`] trait, which is also the substitution point for tests:
//! the chunked fetcher only ever talks to the service through it.

use crate::error::FetchError;

/// Response formatting the plain HTTP API can produce.
///
/// Only `Plain` is machine-parseable; `Html` exists for completeness of the
/// request surface and is rejected by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Plain,
    Html,
}

impl std::fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Html => write!(f, "html"),
        }
    }
}

/// Parameters for one bounded fetch call against the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRequest {
    /// Number of integers to request. Must be positive and within the
    /// service's per-call maximum.
    pub count: usize,
    /// Inclusive lower bound of the value range.
    pub min: i64,
    /// Inclusive upper bound of the value range.
    pub max: i64,
    /// Numeric base the service should format values in (2, 8, 10 or 16).
    pub base: u8,
    /// Response formatting mode.
    pub format: ResponseFormat,
    /// Request fresh randomness rather than a replayable pregenerated set.
    pub fresh: bool,
}

impl ChunkRequest {
    /// Canonical request for `count` uniform bytes: range [0, 255],
    /// decimal plain-text formatting, fresh randomness.
    pub fn bytes(count: usize) -> Self {
        Self {
            count,
            min: 0,
            max: 255,
            base: 10,
            format: ResponseFormat::Plain,
            fresh: true,
        }
    }
}

/// Trait every random-integer service client must implement.
pub trait RandomService {
    /// Fetch exactly `request.count` integers in `[request.min, request.max]`.
    ///
    /// Implementations map service-signalled failures to
    /// [`FetchError::Service`] and network failures to
    /// [`FetchError::Transport`]. They do not retry.
    fn fetch_integers(&self, request: &ChunkRequest) -> Result<Vec<i64>, FetchError>;

    /// Short identifier for logs and display (e.g. `"http_integers"`).
    fn name(&self) -> &'static str;
}
