// Synthline Emitter - Command line runner for the factory floor simulator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # Synthline Emitter
//!
//! Streams synthetic sensor telemetry and production signals to stdout
//! until Ctrl-C, then prints the final production report.
//!
//! ## Usage
//!
//! ```bash
//! # Human-readable console lines
//! synthline-emitter
//!
//! # Machine-readable JSON lines with a fixed seed
//! synthline-emitter --format jsonl --seed 42
//! ```

use clap::{Parser, ValueEnum};
use std::sync::Arc;
use synthline::{ConsoleSink, Simulator, TelemetrySink};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

/// Synthline Factory Floor Emitter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output format for emitted records
    #[arg(short, long, value_enum, default_value = "console")]
    format: Format,

    /// Base seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// Record formats supported on stdout.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// Human-readable lines
    Console,
    /// One JSON object per line
    Jsonl,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing; diagnostics go to stderr so stdout stays a
    // clean record stream.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        EnvFilter::from_default_env().add_directive(level.into())
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Synthline Emitter v{}", env!("CARGO_PKG_VERSION"));
    info!("Press Ctrl-C to stop and print the final report");

    let sink: Arc<dyn TelemetrySink> = match args.format {
        Format::Console => Arc::new(ConsoleSink::stdout()),
        Format::Jsonl => Arc::new(synthline::JsonLineSink::stdout()),
    };

    let mut sim = Simulator::reference(sink);
    info!(
        "Simulating {} equipment units (sensor cadence: {}s)",
        sim.registry().len(),
        synthline::SENSOR_INTERVAL_SECS
    );
    if let Some(seed) = args.seed {
        info!("Using fixed seed {}", seed);
        sim = sim.with_seed(seed);
    }

    match sim.run().await {
        Ok(report) => {
            info!("Emitter finished (total produced: {})", report.total);
        }
        Err(e) => {
            error!("Simulation failed: {}", e);
            std::process::exit(1);
        }
    }
}
