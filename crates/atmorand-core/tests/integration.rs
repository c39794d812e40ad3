//! Integration tests for atmorand-core.
//!
//! These tests verify the full pipeline with a scripted service:
//! chunked fetch (or fallback) → statistics → summary.

use std::sync::Mutex;
use std::time::Duration;

use atmorand_core::{
    ChunkRequest, ChunkedFetcher, FetchConfig, FetchError, RandomService, SourceLabel,
    fetch_or_fallback, stats,
};

/// Scripted service: one canned response per expected call.
struct ScriptedService {
    responses: Mutex<Vec<Result<Vec<i64>, FetchError>>>,
}

impl ScriptedService {
    fn new(responses: Vec<Result<Vec<i64>, FetchError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
        }
    }
}

impl RandomService for ScriptedService {
    fn fetch_integers(&self, request: &ChunkRequest) -> Result<Vec<i64>, FetchError> {
        // The fetcher always asks for byte-range chunks.
        assert_eq!(request.min, 0);
        assert_eq!(request.max, 255);
        let mut responses = self.responses.lock().unwrap();
        assert!(!responses.is_empty(), "more calls than scripted responses");
        responses.remove(0)
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

fn chunk_of(value: i64, n: usize) -> Result<Vec<i64>, FetchError> {
    Ok(vec![value; n])
}

fn config(total: usize, chunk: usize) -> FetchConfig {
    FetchConfig {
        total_bytes: total,
        chunk_size: chunk,
        delay: Duration::from_millis(250),
    }
}

#[test]
fn malformed_fourth_chunk_exposes_no_partial_buffer() {
    // Three good 25-value chunks, then one truncated to 22 values.
    let service = ScriptedService::new(vec![
        chunk_of(1, 25),
        chunk_of(2, 25),
        chunk_of(3, 25),
        chunk_of(4, 22),
    ]);
    let fetcher = ChunkedFetcher::with_sleep(config(100, 25), |_| {}).unwrap();

    let err = fetcher.fetch(&service).unwrap_err();
    match err {
        FetchError::Service(msg) => assert!(msg.contains("expected 25"), "message: {msg}"),
        other => panic!("expected Service error, got {other:?}"),
    }
    // The Err return is the only observable outcome; the three accumulated
    // chunks were discarded with it.
}

#[test]
fn successful_fetch_feeds_statistics() {
    let service = ScriptedService::new(vec![
        Ok((0..64).map(|i| i % 256).collect()),
        Ok((64..128).map(|i| i % 256).collect()),
        Ok((128..192).map(|i| i % 256).collect()),
        Ok((192..256).map(|i| i % 256).collect()),
    ]);
    let fetcher = ChunkedFetcher::with_sleep(config(256, 64), |_| {}).unwrap();

    let bytes = fetcher.fetch(&service).unwrap();
    assert_eq!(bytes.source, SourceLabel::Remote);
    assert_eq!(bytes.data.len(), 256);

    let summary = stats::summarize(bytes.source, &bytes.data, 50);
    assert_eq!(summary.grid.side, 16);
    assert_eq!(summary.histogram.total(), 256);
    // Every value 0..=255 appears exactly once.
    assert!(summary.histogram.counts.iter().all(|&c| c == 1));
    assert_eq!(summary.autocorrelation.values.len(), 50);
    assert_eq!(summary.source, SourceLabel::Remote);
}

#[test]
fn fallback_pipeline_is_visibly_labeled() {
    let service = ScriptedService::new(vec![Err(FetchError::Transport(
        "connection refused".to_string(),
    ))]);
    let fetcher = ChunkedFetcher::with_sleep(config(400, 100), |_| {}).unwrap();

    let bytes = fetch_or_fallback(&fetcher, &service, true).unwrap();
    assert_eq!(bytes.source, SourceLabel::Fallback);
    assert_eq!(bytes.data.len(), 400);

    let summary = stats::summarize(bytes.source, &bytes.data, 10);
    assert_eq!(summary.source, SourceLabel::Fallback);
    assert!(summary.source_description.contains("not true randomness"));
    assert_eq!(summary.grid.side, 20);
}

#[test]
fn quota_style_error_body_aborts_run() {
    let service = ScriptedService::new(vec![
        chunk_of(9, 50),
        Err(FetchError::Service(
            "Error: you have used your quota for today".to_string(),
        )),
    ]);
    let fetcher = ChunkedFetcher::with_sleep(config(200, 50), |_| {}).unwrap();

    let err = fetch_or_fallback(&fetcher, &service, false).unwrap_err();
    assert!(err.to_string().contains("quota for today"));
}
