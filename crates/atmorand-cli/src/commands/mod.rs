pub mod analyze;
pub mod fetch;
pub mod quota;

use std::time::Duration;

use atmorand_core::{
    ChunkedFetcher, FetchConfig, HttpIntegerClient, JsonRpcClient, RandomBytes, RandomService,
    SourceLabel, fetch_or_fallback,
};

/// Build a service client: JSON-RPC when an API key is given, otherwise the
/// plain HTTP integers API.
pub fn make_service(api_key: Option<&str>) -> Box<dyn RandomService> {
    let result: Result<Box<dyn RandomService>, _> = match api_key {
        Some(key) => JsonRpcClient::new(key).map(|c| Box::new(c) as Box<dyn RandomService>),
        None => HttpIntegerClient::new().map(|c| Box::new(c) as Box<dyn RandomService>),
    };
    match result {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Failed to build service client: {e}");
            std::process::exit(1);
        }
    }
}

/// Fetch a buffer with the given shape, exiting with a message on failure.
/// When `fallback` is set and the remote fetch fails, the buffer comes from
/// the local PRNG and a warning goes to stderr.
pub fn acquire(
    bytes: usize,
    chunk_size: usize,
    delay: f64,
    fallback: bool,
    api_key: Option<&str>,
) -> RandomBytes {
    let config = FetchConfig {
        total_bytes: bytes,
        chunk_size,
        delay: Duration::from_secs_f64(delay),
    };
    let fetcher = match ChunkedFetcher::new(config) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let service = make_service(api_key);
    match fetch_or_fallback(&fetcher, service.as_ref(), fallback) {
        Ok(buffer) => {
            if buffer.source == SourceLabel::Fallback {
                eprintln!(
                    "⚠️  Fallback in use (quota/network issue). \
                     Output is pseudorandom, not true randomness."
                );
            }
            buffer
        }
        Err(e) => {
            eprintln!("Failed to fetch random bytes: {e}");
            std::process::exit(1);
        }
    }
}
