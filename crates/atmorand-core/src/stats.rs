//! Descriptive statistics over a fetched byte buffer.
//!
//! Pure functions, no I/O: a square grid reshaping for visualization, a
//! byte-value histogram, per-bit-position one-fractions, and a lag
//! autocorrelation profile. The presentation layer consumes these four
//! results plus the provenance label; the engine's contract ends there.

use serde::Serialize;

use crate::fetcher::SourceLabel;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Row-major square grid of bytes, the "TV static" view of a buffer.
#[derive(Debug, Clone, Serialize)]
pub struct NoiseGrid {
    /// Side length; `pixels.len() == side * side`.
    pub side: usize,
    /// Cells in row-major order.
    pub pixels: Vec<u8>,
}

impl NoiseGrid {
    /// One row of the grid.
    pub fn row(&self, index: usize) -> &[u8] {
        &self.pixels[index * self.side..(index + 1) * self.side]
    }
}

/// Occurrence count per byte value 0..=255.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramResult {
    /// 256 bins; counts sum to the buffer length.
    pub counts: Vec<u64>,
}

impl HistogramResult {
    /// Sum of all bins, equal to the length of the analyzed buffer.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Fraction of set bits per bit position across the buffer.
#[derive(Debug, Clone, Serialize)]
pub struct BitBalanceResult {
    /// One fraction per bit position, index 0 = LSB. Each in [0, 1];
    /// ideally 0.5 for unbiased random bytes.
    pub ones_fraction: [f64; 8],
}

/// Biased, mean-normalized autocorrelation for lags `1..=max_lag`.
#[derive(Debug, Clone, Serialize)]
pub struct AutocorrelationResult {
    pub max_lag: usize,
    /// Index `i` is the correlation at lag `i + 1`. Unitless; near zero
    /// at every lag for independent samples.
    pub values: Vec<f64>,
}

impl AutocorrelationResult {
    /// Largest magnitude in the profile and the lag it occurs at.
    pub fn max_abs(&self) -> (usize, f64) {
        let mut best = (0, 0.0f64);
        for (i, &v) in self.values.iter().enumerate() {
            if v.abs() > best.1.abs() {
                best = (i + 1, v);
            }
        }
        best
    }
}

/// The four views of one buffer, bundled with provenance for display.
#[derive(Debug, Clone, Serialize)]
pub struct NoiseSummary {
    /// Provenance tag (`remote` / `fallback`).
    pub source: SourceLabel,
    /// Human-readable provenance for titles.
    pub source_description: String,
    pub sample_size: usize,
    pub grid: NoiseGrid,
    pub histogram: HistogramResult,
    pub bit_balance: BitBalanceResult,
    pub autocorrelation: AutocorrelationResult,
}

// ---------------------------------------------------------------------------
// Computations
// ---------------------------------------------------------------------------

/// Reshape a buffer into the largest square grid it can fill.
///
/// `side = floor(sqrt(len))`; trailing bytes beyond `side * side` are
/// dropped. Truncation, never padding, is the policy.
pub fn reshape_to_grid(data: &[u8]) -> NoiseGrid {
    let side = (data.len() as f64).sqrt().floor() as usize;
    NoiseGrid {
        side,
        pixels: data[..side * side].to_vec(),
    }
}

/// Count occurrences of each byte value.
///
/// An empty buffer yields all-zero counts rather than an error: a zero
/// histogram is a valid (if vacuous) description of no data.
pub fn histogram(data: &[u8]) -> HistogramResult {
    let mut counts = vec![0u64; 256];
    for &b in data {
        counts[b as usize] += 1;
    }
    HistogramResult { counts }
}

/// Fraction of set bits at each bit position, `mean((byte >> bit) & 1)`.
///
/// Empty input yields all-zero fractions.
pub fn bit_balance(data: &[u8]) -> BitBalanceResult {
    let mut ones_fraction = [0.0f64; 8];
    if data.is_empty() {
        return BitBalanceResult { ones_fraction };
    }

    let n = data.len() as f64;
    let mut counts = [0u64; 8];
    for &byte in data {
        for (bit, count) in counts.iter_mut().enumerate() {
            *count += u64::from((byte >> bit) & 1);
        }
    }
    for (bit, &count) in counts.iter().enumerate() {
        ones_fraction[bit] = count as f64 / n;
    }
    BitBalanceResult { ones_fraction }
}

/// Autocorrelation for lags `1..=max_lag`.
///
/// Values are centered on the sample mean; `variance = dot(x, x) / n`, and
/// `acf[lag] = dot(x[..n-lag], x[lag..]) / n / variance`. This is the
/// biased estimator: the dot product at every lag is divided by the full
/// sample count `n`, not by `n - lag`. A zero-variance (constant or empty)
/// buffer returns `max_lag` zeros; lags at or beyond `n` contribute zero.
pub fn autocorrelation(data: &[u8], max_lag: usize) -> AutocorrelationResult {
    let n = data.len();
    if n == 0 {
        return AutocorrelationResult {
            max_lag,
            values: vec![0.0; max_lag],
        };
    }

    let mean = data.iter().map(|&b| f64::from(b)).sum::<f64>() / n as f64;
    let x: Vec<f64> = data.iter().map(|&b| f64::from(b) - mean).collect();
    let variance = x.iter().map(|&v| v * v).sum::<f64>() / n as f64;
    if variance == 0.0 {
        return AutocorrelationResult {
            max_lag,
            values: vec![0.0; max_lag],
        };
    }

    let mut values = Vec::with_capacity(max_lag);
    for lag in 1..=max_lag {
        if lag >= n {
            values.push(0.0);
            continue;
        }
        let dot: f64 = x[..n - lag]
            .iter()
            .zip(&x[lag..])
            .map(|(&a, &b)| a * b)
            .sum();
        values.push(dot / n as f64 / variance);
    }

    AutocorrelationResult { max_lag, values }
}

/// Compute all four views of a buffer.
pub fn summarize(source: SourceLabel, data: &[u8], max_lag: usize) -> NoiseSummary {
    NoiseSummary {
        source,
        source_description: source.describe().to_string(),
        sample_size: data.len(),
        grid: reshape_to_grid(data),
        histogram: histogram(data),
        bit_balance: bit_balance(data),
        autocorrelation: autocorrelation(data, max_lag),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn random_data(n: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(n);
        let mut state: u64 = 0xdeadbeef;
        for _ in 0..n {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            data.push((state >> 33) as u8);
        }
        data
    }

    // -- reshape ------------------------------------------------------------

    #[test]
    fn reshape_truncates_non_square() {
        let data: Vec<u8> = (0..10).collect();
        let grid = reshape_to_grid(&data);
        assert_eq!(grid.side, 3);
        assert_eq!(grid.pixels.len(), 9);
        // Row-major: the trailing element is the one dropped.
        assert_eq!(grid.row(0), &[0, 1, 2]);
        assert_eq!(grid.row(2), &[6, 7, 8]);
    }

    #[test]
    fn reshape_perfect_square_keeps_everything() {
        let data: Vec<u8> = (0..16).collect();
        let grid = reshape_to_grid(&data);
        assert_eq!(grid.side, 4);
        assert_eq!(grid.pixels.len(), 16);
        assert_eq!(grid.row(3), &[12, 13, 14, 15]);
    }

    #[test]
    fn reshape_empty_is_empty() {
        let grid = reshape_to_grid(&[]);
        assert_eq!(grid.side, 0);
        assert!(grid.pixels.is_empty());
    }

    // -- histogram ----------------------------------------------------------

    #[test]
    fn histogram_counts_sum_to_length() {
        let data = random_data(10_000);
        let hist = histogram(&data);
        assert_eq!(hist.counts.len(), 256);
        assert_eq!(hist.total(), 10_000);
    }

    #[test]
    fn histogram_constant_buffer() {
        let data = vec![5u8; 100];
        let hist = histogram(&data);
        assert_eq!(hist.counts[5], 100);
        let others: u64 = hist
            .counts
            .iter()
            .enumerate()
            .filter(|&(v, _)| v != 5)
            .map(|(_, &c)| c)
            .sum();
        assert_eq!(others, 0);
    }

    #[test]
    fn histogram_empty_is_all_zero() {
        let hist = histogram(&[]);
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.counts.len(), 256);
    }

    // -- bit balance --------------------------------------------------------

    #[test]
    fn bit_balance_all_zero_buffer() {
        let result = bit_balance(&vec![0u8; 1000]);
        assert_eq!(result.ones_fraction, [0.0; 8]);
    }

    #[test]
    fn bit_balance_all_ones_buffer() {
        let result = bit_balance(&vec![0xFFu8; 1000]);
        assert_eq!(result.ones_fraction, [1.0; 8]);
    }

    #[test]
    fn bit_balance_lsb_alternating() {
        // 0, 1, 0, 1, ... — only bit 0 is ever set, in half the elements.
        let data: Vec<u8> = (0..1000).map(|i| (i % 2) as u8).collect();
        let result = bit_balance(&data);
        assert!((result.ones_fraction[0] - 0.5).abs() < 1e-12);
        for &f in &result.ones_fraction[1..] {
            assert_eq!(f, 0.0);
        }
    }

    #[test]
    fn bit_balance_random_near_half() {
        let result = bit_balance(&random_data(50_000));
        for &f in &result.ones_fraction {
            assert!((f - 0.5).abs() < 0.02, "fraction {f} too far from 0.5");
        }
    }

    // -- autocorrelation ----------------------------------------------------

    #[test]
    fn autocorrelation_constant_buffer_is_zeros() {
        for max_lag in [1, 10, 100] {
            let result = autocorrelation(&vec![42u8; 500], max_lag);
            assert_eq!(result.values.len(), max_lag);
            assert!(result.values.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn autocorrelation_random_near_zero() {
        let result = autocorrelation(&random_data(10_000), 100);
        assert_eq!(result.values.len(), 100);
        let (_, max) = result.max_abs();
        assert!(max.abs() < 0.1, "max |acf| = {max}");
    }

    #[test]
    fn autocorrelation_alternating_strong_negative_lag1() {
        let data: Vec<u8> = (0..1000).map(|i| if i % 2 == 0 { 200 } else { 50 }).collect();
        let result = autocorrelation(&data, 4);
        assert!(result.values[0] < -0.9, "lag-1 acf = {}", result.values[0]);
        assert!(result.values[1] > 0.9, "lag-2 acf = {}", result.values[1]);
    }

    #[test]
    fn autocorrelation_biased_normalization() {
        // Hand-computed on [0, 1, 2, 3]: mean 1.5, x = [-1.5, -0.5, 0.5, 1.5],
        // var = 5/4. Lag 1: dot = 0.75+(-0.25)+0.75 = 1.25; 1.25/4/1.25 = 0.25.
        let result = autocorrelation(&[0, 1, 2, 3], 2);
        assert!((result.values[0] - 0.25).abs() < 1e-12);
        // Lag 2: dot = (-0.75)+(-0.75) = -1.5; -1.5/4/1.25 = -0.3.
        assert!((result.values[1] - (-0.3)).abs() < 1e-12);
    }

    #[test]
    fn autocorrelation_lags_beyond_length_are_zero() {
        let result = autocorrelation(&[10, 200, 30], 5);
        assert_eq!(result.values.len(), 5);
        assert_eq!(result.values[3], 0.0);
        assert_eq!(result.values[4], 0.0);
    }

    // -- summary ------------------------------------------------------------

    #[test]
    fn summarize_bundles_everything() {
        let data = random_data(1024);
        let summary = summarize(SourceLabel::Remote, &data, 50);
        assert_eq!(summary.sample_size, 1024);
        assert_eq!(summary.grid.side, 32);
        assert_eq!(summary.histogram.total(), 1024);
        assert_eq!(summary.autocorrelation.values.len(), 50);
        assert_eq!(summary.source, SourceLabel::Remote);
        assert!(summary.source_description.contains("true random"));
    }

    #[test]
    fn summary_serializes_with_provenance() {
        let summary = summarize(SourceLabel::Fallback, &[1, 2, 3, 4], 2);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["grid"]["side"], 2);
        assert_eq!(json["sample_size"], 4);
    }
}
