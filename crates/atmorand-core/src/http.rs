//! Plain-text HTTP integers client.
//!
//! The simplest interface the atmospheric-noise service offers: an HTTP GET
//! against `/integers/` with the desired count, range, base and formatting,
//! answered by a whitespace-separated list of integers. Logical failures
//! come back as a `200 OK` whose body starts with `Error:` — that marker is
//! the authoritative failure signal, distinct from transport-level HTTP
//! status errors.

use std::time::Duration;

use crate::error::FetchError;
use crate::service::{ChunkRequest, RandomService, ResponseFormat};

/// Public endpoint of the atmospheric-noise service.
pub const DEFAULT_BASE_URL: &str = "https://www.random.org";

/// The service caps one GET call at this many integers.
pub const MAX_INTEGERS_PER_CALL: usize = 10_000;

/// Documented prefix of a logical-error response body.
pub const ERROR_MARKER: &str = "Error:";

/// Per-call request timeout. An un-timed-out remote call is a latent hang.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Blocking client for the plain HTTP integers API.
///
/// Requests are bounded by [`DEFAULT_TIMEOUT`] (or an explicit timeout) and
/// issued one at a time; the chunked fetcher owns pacing between calls.
pub struct HttpIntegerClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpIntegerClient {
    /// Client against the public service endpoint with the default timeout.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against an alternative endpoint (mirrors, local test servers).
    pub fn with_base_url(base_url: &str) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Client with an explicit per-call timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("atmorand/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Remaining request quota in bits for the caller's IP.
    ///
    /// The service meters free usage per IP and per day; callers fetching
    /// large buffers should check this before hammering `/integers/`.
    pub fn quota(&self) -> Result<i64, FetchError> {
        let url = format!("{}/quota/", self.base_url);
        let body = self
            .client
            .get(&url)
            .query(&[("format", "plain")])
            .send()?
            .error_for_status()?
            .text()?;
        let body = body.trim();
        if body.starts_with(ERROR_MARKER) {
            return Err(FetchError::Service(body.to_string()));
        }
        body.parse::<i64>()
            .map_err(|_| FetchError::Service(format!("unparsable quota body: {body:?}")))
    }
}

impl RandomService for HttpIntegerClient {
    fn fetch_integers(&self, request: &ChunkRequest) -> Result<Vec<i64>, FetchError> {
        if request.count == 0 || request.count > MAX_INTEGERS_PER_CALL {
            return Err(FetchError::Configuration(format!(
                "per-call count must be in 1..={MAX_INTEGERS_PER_CALL}, got {}",
                request.count
            )));
        }
        validate_base(request.base)?;
        if request.format != ResponseFormat::Plain {
            return Err(FetchError::Configuration(
                "only plain-format responses are machine-parseable".to_string(),
            ));
        }

        let url = format!("{}/integers/", self.base_url);
        let rnd = if request.fresh { "new" } else { "id.atmorand" };
        let query = [
            ("num", request.count.to_string()),
            ("min", request.min.to_string()),
            ("max", request.max.to_string()),
            ("col", "1".to_string()),
            ("base", request.base.to_string()),
            ("format", request.format.to_string()),
            ("rnd", rnd.to_string()),
        ];

        log::debug!("GET {url} num={} base={}", request.count, request.base);
        let body = self
            .client
            .get(&url)
            .query(&query)
            .send()?
            .error_for_status()?
            .text()?;

        parse_plain_integers(&body, request.base)
    }

    fn name(&self) -> &'static str {
        "http_integers"
    }
}

/// The bases the plain API can format integers in.
fn validate_base(base: u8) -> Result<(), FetchError> {
    match base {
        2 | 8 | 10 | 16 => Ok(()),
        other => Err(FetchError::Configuration(format!(
            "base must be one of 2, 8, 10, 16; got {other}"
        ))),
    }
}

/// Parse a plain-format response body: the error marker first, then
/// whitespace-separated integers in the requested base.
fn parse_plain_integers(body: &str, base: u8) -> Result<Vec<i64>, FetchError> {
    let body = body.trim();
    if body.starts_with(ERROR_MARKER) {
        return Err(FetchError::Service(body.to_string()));
    }
    body.split_whitespace()
        .map(|token| {
            i64::from_str_radix(token, u32::from(base)).map_err(|_| {
                FetchError::Service(format!("unparsable integer {token:?} in response body"))
            })
        })
        .collect()
}
