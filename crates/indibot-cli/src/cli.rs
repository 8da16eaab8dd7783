//! CLI entry and dispatch.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "indibot")]
#[command(version = "0.1")]
#[command(about = "IndiBot terminal chat shell")]
struct Cli {
    /// Write debug logs to this file (the TUI owns stderr)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.log_file {
        init_logging(path)?;
    }

    indibot_tui::run()
}

/// Initializes file-based tracing output.
///
/// The log level is taken from the `INDIBOT_LOG` env var and defaults to
/// `debug`. Logging is off entirely unless `--log-file` is passed, since
/// both stdout and stderr belong to the TUI while it runs.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("INDIBOT_LOG").unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
