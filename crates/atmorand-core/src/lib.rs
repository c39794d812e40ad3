//! # atmorand-core
//!
//! **True-random bytes from atmospheric noise.**
//!
//! `atmorand-core` fetches large quantities of true-random bytes from a
//! remote atmospheric-noise integer service in bounded-size chunks (the
//! service caps how many values one call may return), and computes
//! descriptive statistics over the resulting buffer: a square grid
//! reshaping, a byte-value histogram, per-bit one-fractions, and a lag
//! autocorrelation profile.
//!
//! ## Quick Start
//!
//! ```no_run
//! use atmorand_core::{ChunkedFetcher, FetchConfig, HttpIntegerClient, stats};
//!
//! let client = HttpIntegerClient::new()?;
//! let fetcher = ChunkedFetcher::new(FetchConfig::default())?;
//!
//! // 65,536 bytes fetched in strictly sequential chunks.
//! let bytes = fetcher.fetch(&client)?;
//! assert_eq!(bytes.data.len(), 65_536);
//!
//! let summary = stats::summarize(bytes.source, &bytes.data, 100);
//! println!("grid: {0}x{0}", summary.grid.side);
//! # Ok::<(), atmorand_core::FetchError>(())
//! ```
//!
//! ## Architecture
//!
//! Service client → Chunked fetcher (or fallback PRNG) → Statistics → Output
//!
//! Two clients speak to the remote service: [`HttpIntegerClient`] uses the
//! plain-text HTTP integers API, [`JsonRpcClient`] the JSON-RPC invoke
//! endpoint (requires an API key). Both implement [`RandomService`], the
//! seam the fetcher and tests work against.
//!
//! Chunk requests are issued strictly sequentially with a polite inter-call
//! delay; the service imposes per-call and per-day quotas. Failures are
//! never retried internally and never silently substituted: the fallback
//! generator is a caller-level opt-in, and the resulting buffer carries a
//! [`SourceLabel`] so provenance travels with the data.

pub mod error;
pub mod fallback;
pub mod fetcher;
pub mod http;
pub mod jsonrpc;
pub mod service;
pub mod stats;

pub use error::FetchError;
pub use fallback::{fallback_bytes, fallback_bytes_with};
pub use fetcher::{ChunkedFetcher, FetchConfig, RandomBytes, SourceLabel, fetch_or_fallback};
pub use http::{HttpIntegerClient, MAX_INTEGERS_PER_CALL};
pub use jsonrpc::{JsonRpcClient, UsageReport};
pub use service::{ChunkRequest, RandomService, ResponseFormat};
pub use stats::{
    AutocorrelationResult, BitBalanceResult, HistogramResult, NoiseGrid, NoiseSummary,
    autocorrelation, bit_balance, histogram, reshape_to_grid, summarize,
};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
