// src/logging.rs

//! Logging setup for `shellstep` using `tracing` + `tracing-subscriber`.
//!
//! The filter is chosen in this order:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `SHELLSTEP_LOG`, either a bare level (`"debug"`) or a full filter
//!    directive (`"shellstep::exec=trace,info"`)
//! 3. `info`
//!
//! Logs go to STDERR. STDOUT carries only log-only records and checksum
//! listings, so it can be redirected into a script.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::LogLevel;

const LOG_ENV: &str = "SHELLSTEP_LOG";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let filter = match cli_level {
        Some(lvl) => EnvFilter::new(directive_for(lvl)),
        None => filter_from_env().unwrap_or_else(|| EnvFilter::new("info")),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

fn filter_from_env() -> Option<EnvFilter> {
    let raw = std::env::var(LOG_ENV).ok()?;
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match EnvFilter::try_new(raw) {
        Ok(filter) => Some(filter),
        Err(err) => {
            eprintln!("ignoring invalid {LOG_ENV}={raw:?}: {err}");
            None
        }
    }
}

fn directive_for(lvl: LogLevel) -> &'static str {
    match lvl {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    }
}
