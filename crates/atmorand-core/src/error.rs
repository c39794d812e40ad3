//! Closed error taxonomy for remote fetching.
//!
//! Three kinds cover everything the fetch path can raise. The core never
//! retries: every error propagates to the caller, which decides whether to
//! substitute the fallback generator.

use thiserror::Error;

/// Everything that can go wrong while fetching random integers.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure reaching the service: connect/timeout errors
    /// or a non-success HTTP status. The service never saw or never
    /// answered the request in a usable way.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The service responded but signalled a logical error: an
    /// `Error:`-prefixed body, a JSON-RPC error object, a truncated or
    /// malformed payload, or an out-of-range value.
    #[error("service error: {0}")]
    Service(String),

    /// Invalid parameter combination. Raised before any network activity.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // A body that arrived but failed to decode is the service's fault;
        // everything else (connect, timeout, status) is transport.
        if err.is_decode() {
            FetchError::Service(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}
