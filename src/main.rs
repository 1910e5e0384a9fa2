//! sampleferry - ferry audio samples onto a device through a dual-pane TUI.
//!
//! Usage:
//!   sferry DEVICE_DIR                 Launch the browser against a device directory
//!   sferry DEVICE_DIR -s ~/samples    Open the source pane at a specific directory
//!   sferry --help                     Show help

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use sampleferry_tui::RunOptions;

#[derive(Parser)]
#[command(
    name = "sampleferry",
    version,
    about = "A dual-pane terminal browser for ferrying samples onto a device",
    long_about = "sampleferry copies audio samples from your machine onto a \
                  device directory.\n\n\
                  The destination pane stays clamped to the device root, so \
                  transfers and navigation can never escape it."
)]
struct Cli {
    /// Device directory the destination pane is bound to
    destination: PathBuf,

    /// Starting directory for the source pane (defaults to your home)
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Start with the light theme
    #[arg(long)]
    light: bool,

    /// Append tracing output to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // The guard flushes buffered log lines when the program exits.
    let _log_guard = match &cli.log_file {
        Some(path) => Some(init_logging(path)?),
        None => None,
    };

    let destination = cli
        .destination
        .canonicalize()
        .context("Invalid destination directory")?;
    if !destination.is_dir() {
        bail!("{} is not a directory", destination.display());
    }

    let source = match cli.source {
        Some(path) => Some(path.canonicalize().context("Invalid source directory")?),
        None => None,
    };

    tracing::info!(destination = %destination.display(), "launching");

    sampleferry_tui::run(RunOptions {
        destination,
        source,
        light_theme: cli.light,
    })
}

/// Route tracing output into a file; the terminal belongs to the TUI.
fn init_logging(path: &Path) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Cannot open log file {}", path.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(file);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
