//! Logging setup: console, full run log and warnings log.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::error::{Error, Result};
use crate::fs::HomePaths;

/// Install the global subscriber.
///
/// The console honours `RUST_LOG`, defaulting to `info` (`debug` with
/// `debug`). The run log is truncated and records everything at debug
/// level; the warnings log is appended to and only sees warnings and
/// errors.
pub fn init_logging(paths: &HomePaths, debug: bool) -> Result<()> {
    let level = if debug { "debug" } else { "info" };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let run_log = File::create(&paths.run_log)?;
    let warning_log = append(&paths.warning_log)?;

    let console = fmt::layer().with_target(false).with_filter(console_filter);
    let run = fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(run_log))
        .with_filter(LevelFilter::DEBUG);
    let warnings = fmt::layer()
        .with_ansi(false)
        .with_writer(Mutex::new(warning_log))
        .with_filter(LevelFilter::WARN);

    tracing_subscriber::registry()
        .with(console)
        .with(run)
        .with(warnings)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))
}

/// Append the start time of this run to the timestamp log.
pub fn log_run_timestamp(path: &Path) -> Result<()> {
    let mut file = append(path)?;
    writeln!(file, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    Ok(())
}

fn append(path: &Path) -> Result<File> {
    Ok(OpenOptions::new().create(true).append(true).open(path)?)
}
