use std::io::Write;

pub fn run(
    bytes: usize,
    chunk_size: usize,
    delay: f64,
    fallback: bool,
    api_key: Option<&str>,
    format: &str,
    output: Option<&str>,
) {
    let buffer = super::acquire(bytes, chunk_size, delay, fallback, api_key);

    if let Some(path) = output {
        if let Err(e) = std::fs::write(path, &buffer.data) {
            eprintln!("Failed to write {path}: {e}");
            std::process::exit(1);
        }
        println!(
            "Wrote {} bytes to {path} [source: {}]",
            buffer.data.len(),
            buffer.source
        );
        return;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let write_result = match format {
        "raw" => out.write_all(&buffer.data),
        _ => {
            let hex: String = buffer.data.iter().map(|b| format!("{b:02x}")).collect();
            out.write_all(hex.as_bytes()).and_then(|_| out.write_all(b"\n"))
        }
    };
    if write_result.is_err() {
        // Broken pipe; nothing useful left to do.
        return;
    }
    let _ = out.flush();
}
