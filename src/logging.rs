// src/logging.rs
//! Tracing setup. The terminal belongs to the UI, so logs go to a file.

use std::fs;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogSettings;

pub const LOG_FILE: &str = "spectral-lab.log";

/// Install the global subscriber. Keep the returned guard alive until exit
/// or buffered lines are lost.
pub fn init(settings: &LogSettings) -> Result<WorkerGuard> {
    fs::create_dir_all(&settings.directory).with_context(|| {
        format!("failed to create log directory {:?}", settings.directory)
    })?;

    let filter = EnvFilter::builder()
        .with_default_directive(
            settings
                .level
                .parse()
                .with_context(|| format!("invalid log level {:?}", settings.level))?,
        )
        .from_env_lossy();

    let appender = tracing_appender::rolling::never(&settings.directory, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()
        .context("failed to install tracing subscriber")?;

    tracing::info!(directory = ?settings.directory, level = %settings.level, "logging initialised");
    Ok(guard)
}
