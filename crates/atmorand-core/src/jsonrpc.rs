//! JSON-RPC client for the atmospheric-noise service.
//!
//! The structured interface: authenticated with an API key, metered per
//! key rather than per IP, and answering over a single POST `invoke`
//! endpoint. Only the two methods the fetch pipeline needs are bound:
//! `generateIntegers` and `getUsage`.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::http::MAX_INTEGERS_PER_CALL;
use crate::service::{ChunkRequest, RandomService};

/// Release 4 invoke endpoint.
pub const DEFAULT_INVOKE_URL: &str = "https://api.random.org/json-rpc/4/invoke";

/// Blocking JSON-RPC 2.0 client, one request id per call.
pub struct JsonRpcClient {
    client: reqwest::blocking::Client,
    url: String,
    api_key: String,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    /// Client for the public invoke endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_url(api_key, DEFAULT_INVOKE_URL)
    }

    /// Client for an alternative invoke endpoint (test servers).
    pub fn with_url(api_key: impl Into<String>, url: &str) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(crate::http::DEFAULT_TIMEOUT)
            .user_agent(concat!("atmorand/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
            api_key: api_key.into(),
            next_id: AtomicU64::new(1),
        })
    }

    /// Current usage for this API key.
    pub fn get_usage(&self) -> Result<UsageReport, FetchError> {
        self.invoke(
            "getUsage",
            GetUsageParams {
                api_key: &self.api_key,
            },
        )
    }

    /// POST one envelope, unwrap the result-or-error pair.
    fn invoke<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, FetchError> {
        let envelope = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };

        log::debug!("POST {} method={method}", self.url);
        let response: RpcResponse<R> = self
            .client
            .post(&self.url)
            .json(&envelope)
            .send()?
            .error_for_status()?
            .json()?;

        if let Some(err) = response.error {
            return Err(FetchError::Service(format!(
                "json-rpc error {}: {}",
                err.code, err.message
            )));
        }
        response.result.ok_or_else(|| {
            FetchError::Service("response carried neither result nor error".to_string())
        })
    }
}

impl RandomService for JsonRpcClient {
    fn fetch_integers(&self, request: &ChunkRequest) -> Result<Vec<i64>, FetchError> {
        if request.count == 0 || request.count > MAX_INTEGERS_PER_CALL {
            return Err(FetchError::Configuration(format!(
                "per-call count must be in 1..={MAX_INTEGERS_PER_CALL}, got {}",
                request.count
            )));
        }

        // Decimal on the wire regardless of request.base: with base 10 the
        // payload arrives as JSON numbers instead of strings.
        let result: GenerateIntegersResult = self.invoke(
            "generateIntegers",
            GenerateIntegersParams {
                api_key: &self.api_key,
                n: request.count,
                min: request.min,
                max: request.max,
                replacement: true,
            },
        )?;

        if let Some(bits_left) = result.bits_left {
            log::debug!("generateIntegers ok, {bits_left} bits left");
        }
        Ok(result.random.data)
    }

    fn name(&self) -> &'static str {
        "json_rpc"
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct RpcRequest<'a, P: Serialize> {
    jsonrpc: &'static str,
    method: &'a str,
    params: P,
    id: u64,
}

#[derive(Deserialize)]
struct RpcResponse<R> {
    result: Option<R>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateIntegersParams<'a> {
    api_key: &'a str,
    n: usize,
    min: i64,
    max: i64,
    replacement: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateIntegersResult {
    random: RandomPayload,
    bits_left: Option<i64>,
}

#[derive(Deserialize)]
struct RandomPayload {
    data: Vec<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GetUsageParams<'a> {
    api_key: &'a str,
}

/// Quota state of an API key, from `getUsage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    /// Key status: `running`, `stopped` or `paused`.
    pub status: String,
    /// Random bits remaining in the key's daily allowance.
    pub bits_left: i64,
    /// Requests remaining in the key's daily allowance.
    pub requests_left: i64,
    /// Total bits ever served against this key.
    #[serde(default)]
    pub total_bits: Option<i64>,
    /// Total requests ever served against this key.
    #[serde(default)]
    pub total_requests: Option<i64>,
}
