//! CLI for atmorand — true-random bytes from atmospheric noise.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "atmorand")]
#[command(about = "atmorand — true-random bytes from atmospheric noise")]
#[command(version = atmorand_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch true-random bytes in polite sequential chunks
    Fetch {
        /// Total bytes to fetch (must be a multiple of --chunk-size)
        #[arg(long, default_value = "65536")]
        bytes: usize,

        /// Integers per service call (the service caps one call at 10000)
        #[arg(long, default_value = "4096")]
        chunk_size: usize,

        /// Seconds to pause between successive calls (be polite)
        #[arg(long, default_value = "0.5")]
        delay: f64,

        /// Substitute a local PRNG for the whole buffer if the remote
        /// fetch fails; the output is clearly labeled
        #[arg(long)]
        fallback: bool,

        /// JSON-RPC API key; uses the plain HTTP API when absent
        #[arg(long)]
        api_key: Option<String>,

        /// Stdout format when no --output file is given
        #[arg(long, default_value = "hex", value_parser = ["hex", "raw"])]
        format: String,

        /// Write raw bytes to a file instead of stdout
        #[arg(long)]
        output: Option<String>,
    },

    /// Fetch a buffer and print its statistical views: grid, histogram,
    /// bit balance, autocorrelation
    Analyze {
        /// Total bytes to fetch (must be a multiple of --chunk-size)
        #[arg(long, default_value = "65536")]
        bytes: usize,

        /// Integers per service call (the service caps one call at 10000)
        #[arg(long, default_value = "4096")]
        chunk_size: usize,

        /// Seconds to pause between successive calls
        #[arg(long, default_value = "0.5")]
        delay: f64,

        /// Substitute a local PRNG if the remote fetch fails
        #[arg(long)]
        fallback: bool,

        /// JSON-RPC API key; uses the plain HTTP API when absent
        #[arg(long)]
        api_key: Option<String>,

        /// Largest autocorrelation lag to compute
        #[arg(long, default_value = "100")]
        max_lag: usize,

        /// Write the full summary as JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// Show remaining service quota
    Quota {
        /// JSON-RPC API key; checks the per-IP HTTP quota when absent
        #[arg(long)]
        api_key: Option<String>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            bytes,
            chunk_size,
            delay,
            fallback,
            api_key,
            format,
            output,
        } => commands::fetch::run(
            bytes,
            chunk_size,
            delay,
            fallback,
            api_key.as_deref(),
            &format,
            output.as_deref(),
        ),
        Commands::Analyze {
            bytes,
            chunk_size,
            delay,
            fallback,
            api_key,
            max_lag,
            output,
        } => commands::analyze::run(
            bytes,
            chunk_size,
            delay,
            fallback,
            api_key.as_deref(),
            max_lag,
            output.as_deref(),
        ),
        Commands::Quota { api_key } => commands::quota::run(api_key.as_deref()),
    }
}
