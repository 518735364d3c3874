mod rotating_writer;

pub use rotating_writer::RotatingFileWriter;

use crate::config::LogSettings;
use anyhow::{Context, Result};
use std::sync::Mutex;
use tracing::{level_filters::LevelFilter, Level};
use tracing_subscriber::{
    fmt::writer::MakeWriterExt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

pub const APP_LOG_FILE: &str = "app.log";
pub const ERROR_LOG_FILE: &str = "error.log";

/// Installs the global subscriber: console output plus `app.log` and an
/// errors-only `error.log` in the configured directory.
pub fn init_logging(settings: &LogSettings) -> Result<()> {
    let app_log = RotatingFileWriter::new(
        settings.dir.join(APP_LOG_FILE),
        settings.max_file_size_bytes,
    )?;
    let error_log = RotatingFileWriter::new(
        settings.dir.join(ERROR_LOG_FILE),
        settings.max_file_size_bytes,
    )?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(app_log)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(error_log).with_max_level(Level::ERROR)),
        )
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(())
}
