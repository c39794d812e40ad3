//! Chunked fetching with provenance tagging.
//!
//! The service caps one call at [`MAX_INTEGERS_PER_CALL`] integers, so a
//! large buffer is assembled from strictly sequential chunk requests with a
//! polite delay between calls. A failure on any chunk aborts the remaining
//! chunks and propagates; the caller decides whether to substitute the
//! fallback generator for the *entire* buffer. Remote and fallback bytes
//! are never mixed, and the provenance travels with the data as a
//! [`SourceLabel`].

use std::time::Duration;

use serde::Serialize;

use crate::error::FetchError;
use crate::http::MAX_INTEGERS_PER_CALL;
use crate::service::{ChunkRequest, RandomService};

/// Provenance of a byte buffer: genuinely fetched, or locally generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLabel {
    /// Every byte came from the remote atmospheric-noise service.
    Remote,
    /// Every byte came from the local pseudorandom fallback.
    Fallback,
}

impl SourceLabel {
    /// Human-readable provenance for titles and report headers.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Remote => "atmospheric noise (true random)",
            Self::Fallback => "fallback PRNG (not true randomness)",
        }
    }
}

impl std::fmt::Display for SourceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// A byte buffer tagged with the source that actually produced it.
#[derive(Debug, Clone)]
pub struct RandomBytes {
    pub source: SourceLabel,
    pub data: Vec<u8>,
}

impl RandomBytes {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Parameters for one chunked fetch run.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Total bytes to assemble. Must be a positive multiple of `chunk_size`.
    pub total_bytes: usize,
    /// Integers per service call. Must be within the per-call maximum.
    pub chunk_size: usize,
    /// Pause between successive calls. The service meters free usage, so
    /// this is not optional; it elapses after every chunk except the last.
    pub delay: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            total_bytes: 65_536, // 256x256 grid
            chunk_size: 4_096,
            delay: Duration::from_millis(500),
        }
    }
}

impl FetchConfig {
    /// Fail fast before any network activity.
    pub fn validate(&self) -> Result<(), FetchError> {
        if self.total_bytes == 0 {
            return Err(FetchError::Configuration(
                "total byte count must be positive".to_string(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(FetchError::Configuration(
                "chunk size must be positive".to_string(),
            ));
        }
        if self.chunk_size > MAX_INTEGERS_PER_CALL {
            return Err(FetchError::Configuration(format!(
                "chunk size {} exceeds the per-call maximum of {MAX_INTEGERS_PER_CALL}",
                self.chunk_size
            )));
        }
        if self.total_bytes % self.chunk_size != 0 {
            return Err(FetchError::Configuration(format!(
                "total byte count {} must be a multiple of chunk size {}",
                self.total_bytes, self.chunk_size
            )));
        }
        Ok(())
    }

    /// Number of service calls one run will issue.
    pub fn chunk_count(&self) -> usize {
        self.total_bytes / self.chunk_size
    }
}

/// Sequential chunk loop against a [`RandomService`].
///
/// The delay between calls is an injected function so tests can substitute
/// a zero-delay clock without altering chunk-count or ordering assertions.
pub struct ChunkedFetcher {
    config: FetchConfig,
    sleep: Box<dyn Fn(Duration) + Send + Sync>,
}

impl ChunkedFetcher {
    /// Fetcher that really sleeps between calls.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        Self::with_sleep(config, std::thread::sleep)
    }

    /// Fetcher with a custom delay function (tests use a no-op).
    pub fn with_sleep(
        config: FetchConfig,
        sleep: impl Fn(Duration) + Send + Sync + 'static,
    ) -> Result<Self, FetchError> {
        config.validate()?;
        Ok(Self {
            config,
            sleep: Box::new(sleep),
        })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetch `total_bytes` in `total_bytes / chunk_size` sequential calls.
    ///
    /// Each chunk must come back with exactly `chunk_size` values, all in
    /// [0, 255]; anything else is a [`FetchError::Service`] and the whole
    /// run is abandoned. No partial buffer is ever returned, and there is
    /// no internal retry.
    pub fn fetch(&self, service: &dyn RandomService) -> Result<RandomBytes, FetchError> {
        let chunks = self.config.chunk_count();
        let request = ChunkRequest::bytes(self.config.chunk_size);
        let mut data = Vec::with_capacity(self.config.total_bytes);

        log::info!(
            "fetching {} bytes from {} in {chunks} chunk(s) of {}",
            self.config.total_bytes,
            service.name(),
            self.config.chunk_size
        );

        for chunk_index in 0..chunks {
            let values = service.fetch_integers(&request)?;
            if values.len() != self.config.chunk_size {
                return Err(FetchError::Service(format!(
                    "unexpected element count in chunk {chunk_index}: got {} expected {}",
                    values.len(),
                    self.config.chunk_size
                )));
            }
            for value in values {
                let byte = u8::try_from(value).map_err(|_| {
                    FetchError::Service(format!(
                        "value {value} in chunk {chunk_index} is outside [0, 255]"
                    ))
                })?;
                data.push(byte);
            }
            log::debug!("chunk {}/{chunks} ok", chunk_index + 1);

            if chunk_index + 1 < chunks {
                (self.sleep)(self.config.delay);
            }
        }

        Ok(RandomBytes {
            source: SourceLabel::Remote,
            data,
        })
    }
}

/// Fetch, and on failure substitute the fallback generator, but only when
/// the caller has opted in.
///
/// The substitution covers the entire buffer, never individual chunks, so
/// the provenance stays unambiguous. Configuration errors are never masked
/// by the fallback: bad parameters should surface, not produce data.
pub fn fetch_or_fallback(
    fetcher: &ChunkedFetcher,
    service: &dyn RandomService,
    use_fallback: bool,
) -> Result<RandomBytes, FetchError> {
    match fetcher.fetch(service) {
        Ok(bytes) => Ok(bytes),
        Err(err @ FetchError::Configuration(_)) => Err(err),
        Err(err) => {
            if use_fallback {
                log::warn!("remote fetch failed ({err}), substituting fallback PRNG");
                Ok(crate::fallback::fallback_bytes(fetcher.config().total_bytes))
            } else {
                Err(err)
            }
        }
    }
}
