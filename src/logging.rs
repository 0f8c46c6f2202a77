//! Tracing setup: console output plus optional append-only log files.
//!
//! The activity log receives everything this crate logs at info and above;
//! the error log receives only warnings and errors, so failed lookups can be
//! reviewed after a long scan.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LoggingConfig;
use crate::error::{Error, Result, ResultExt};

/// Console filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "album_art_finder=info";

const CRATE_TARGET: &str = "album_art_finder";

/// Install the global subscriber.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let console = fmt::layer().with_target(false).with_filter(console_filter);

    let activity = match &config.log_file {
        Some(path) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(open_append(path)?))
                .with_filter(Targets::new().with_target(CRATE_TARGET, Level::INFO)),
        ),
        None => None,
    };

    let errors = match &config.error_log_file {
        Some(path) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(open_append(path)?))
                .with_filter(Targets::new().with_target(CRATE_TARGET, Level::WARN)),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(console)
        .with(activity)
        .with(errors)
        .try_init()
        .map_err(|e| Error::logging(e.to_string()))
}

fn open_append(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(format!("creating log directory {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(format!("opening log file {}", path.display()))
}
