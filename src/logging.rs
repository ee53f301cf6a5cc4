//! Tracing subscriber setup.
//!
//! `RUST_LOG` takes precedence over `[logging] level`. An unparsable level
//! falls back to `info` instead of refusing to start.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;
use crate::{FeedError, Result};

const FALLBACK_DIRECTIVE: &str = "info";

/// Filter from configured directives, ignoring `RUST_LOG`.
fn directives(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|e| {
        eprintln!("Ignoring log level {level:?}: {e}");
        EnvFilter::new(FALLBACK_DIRECTIVE)
    })
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| directives(level))
}

fn open_log_file(path: &str) -> Result<Arc<std::fs::File>> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Arc::new(file))
}

/// Install the global subscriber: console, plus the log file when configured.
///
/// Fails if the log file cannot be opened or a subscriber is already set;
/// nothing is installed in either case.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let file_layer = match config.file.as_deref() {
        Some(path) => Some(
            fmt::layer()
                .with_writer(open_log_file(path)?)
                .with_ansi(false),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter(&config.level))
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .try_init()
        .map_err(|e| FeedError::Config(format!("logging: {e}")))
}
