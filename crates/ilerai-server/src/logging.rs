//! Tracing bootstrap.
//!
//! Human-readable events go to stderr. When a logs directory is given, the
//! same events are also written without ANSI colours to a daily rolling file
//! `ilerai.log.YYYY-MM-DD`. `RUST_LOG` overrides the default `info` filter.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Keeps the file writer flushing; drop it only at process exit.
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

pub fn init(logs_dir: Option<&Path>) -> Result<LogGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);

    let Some(logs_dir) = logs_dir else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .try_init()
            .context("failed to install tracing subscriber")?;
        return Ok(LogGuard { _file: None });
    };

    std::fs::create_dir_all(logs_dir)
        .with_context(|| format!("failed to create logs directory {}", logs_dir.display()))?;
    let appender = tracing_appender::rolling::daily(logs_dir, "ilerai.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(LogGuard { _file: Some(guard) })
}
