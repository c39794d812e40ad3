use atmorand_core::{NoiseSummary, stats};

/// Shade ramp for the grid preview, darkest to brightest.
const SHADES: &[u8] = b" .:-=+*#%@";

pub fn run(
    bytes: usize,
    chunk_size: usize,
    delay: f64,
    fallback: bool,
    api_key: Option<&str>,
    max_lag: usize,
    output: Option<&str>,
) {
    let buffer = super::acquire(bytes, chunk_size, delay, fallback, api_key);
    let summary = stats::summarize(buffer.source, &buffer.data, max_lag);

    print_summary(&summary);

    if let Some(path) = output {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    eprintln!("Failed to write {path}: {e}");
                } else {
                    println!("\n📄 Summary saved to: {path}");
                }
            }
            Err(e) => eprintln!("Failed to serialize summary: {e}"),
        }
    }
}

fn print_summary(summary: &NoiseSummary) {
    println!("\n{}", "=".repeat(60));
    println!("RANDOMNESS SUMMARY — {}", summary.source_description);
    println!("{}", "=".repeat(60));
    println!(
        "Samples: {} | Grid: {side}x{side} px",
        summary.sample_size,
        side = summary.grid.side
    );

    print_grid_preview(summary);
    print_histogram(summary);
    print_bit_balance(summary);
    print_autocorrelation(summary);
}

/// Downsampled ASCII rendering of the noise grid. True random input looks
/// like uniform static; stripes or banding betray structure.
fn print_grid_preview(summary: &NoiseSummary) {
    let side = summary.grid.side;
    if side == 0 {
        return;
    }
    let preview = 32.min(side);
    let step = side / preview;

    println!("\nNoise grid ({side}x{side}, preview {preview}x{preview}):");
    for row in 0..preview {
        let mut line = String::with_capacity(preview);
        for col in 0..preview {
            let byte = summary.grid.row(row * step)[col * step];
            let shade = SHADES[byte as usize * SHADES.len() / 256];
            line.push(shade as char);
        }
        println!("  {line}");
    }
}

fn print_histogram(summary: &NoiseSummary) {
    let counts = &summary.histogram.counts;
    let total = summary.histogram.total();
    let (min_value, min_count) = counts
        .iter()
        .enumerate()
        .min_by_key(|&(_, &c)| c)
        .map(|(v, &c)| (v, c))
        .unwrap_or((0, 0));
    let (max_value, max_count) = counts
        .iter()
        .enumerate()
        .max_by_key(|&(_, &c)| c)
        .map(|(v, &c)| (v, c))
        .unwrap_or((0, 0));

    println!("\nByte histogram (0-255):");
    println!("  Total counts: {total} (expected {}/bin)", total / 256);
    println!("  Rarest value:  0x{min_value:02x} x{min_count}");
    println!("  Most common:   0x{max_value:02x} x{max_count}");
}

fn print_bit_balance(summary: &NoiseSummary) {
    println!("\nBit balance (fraction of 1s, ideal 0.5):");
    for (bit, &fraction) in summary.bit_balance.ones_fraction.iter().enumerate() {
        let bar_len = (fraction * 40.0).round() as usize;
        println!(
            "  bit {bit} (LSB+{bit}): {fraction:.4} {}",
            "#".repeat(bar_len)
        );
    }
}

fn print_autocorrelation(summary: &NoiseSummary) {
    let acf = &summary.autocorrelation;
    let n = summary.sample_size as f64;
    // 95% significance band for white noise.
    let threshold = if n > 0.0 { 2.0 / n.sqrt() } else { 0.0 };
    let violations = acf.values.iter().filter(|v| v.abs() > threshold).count();
    let (max_lag, max_value) = acf.max_abs();

    println!("\nAutocorrelation (lags 1-{}):", acf.max_lag);
    println!("  Peak: {max_value:+.4} at lag {max_lag}");
    println!(
        "  |acf| > {threshold:.4} (95% band) at {violations}/{} lags",
        acf.values.len()
    );
    for (i, &v) in acf.values.iter().take(10).enumerate() {
        println!("  lag {:>3}: {v:+.4}", i + 1);
    }
}
