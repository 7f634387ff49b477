//! copperflow: cursor-driven PCB layout generator
//!
//! Generates one of the predefined protoboard variants and writes an SVG
//! preview of the result.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use copperflow::assembly::{self, BoardVariant};
use copperflow::config;
use copperflow::export::svg;

/// Cursor-driven PCB layout generator.
///
/// Builds a predefined protoboard variant — microcontroller, escaped bus,
/// distributor fan-out, peripheral modules — and writes an SVG preview.
#[derive(Parser, Debug)]
#[command(name = "copperflow")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Board variant to generate
    #[arg(value_enum, default_value = "coop-monitor")]
    variant: Variant,

    /// Output SVG path
    #[arg(short, long, default_value = "copperflow.svg")]
    output: PathBuf,

    /// Path to configuration file
    #[arg(short, long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// CLI-facing board variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Variant {
    /// Pico + I2C sensor + sensed power entry + LoRa modem.
    CoopMonitor,
    /// Pico + power entry + GPS + 7-segment display + switch.
    LargeClock,
}

impl From<Variant> for BoardVariant {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::CoopMonitor => Self::CoopMonitor,
            Variant::LargeClock => Self::LargeClock,
        }
    }
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Entry point for the copperflow generator.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let cfg = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        variant = ?args.variant,
        "Starting copperflow"
    );

    // Build the board. Any layout failure aborts the run and leaves no
    // output artifact behind.
    let board = match assembly::build_variant(args.variant.into(), cfg.rules) {
        Ok(board) => board,
        Err(e) => {
            error!(error = %e, "Layout failed");
            eprintln!("Layout failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        tracks = board.tracks().len(),
        vias = board.vias().len(),
        "Layout complete"
    );

    if let Err(e) = svg::write(&board, &args.output) {
        error!(error = %e, "Export failed");
        eprintln!("Export failed: {e}");
        return ExitCode::FAILURE;
    }

    println!("Wrote {}", args.output.display());
    ExitCode::SUCCESS
}
