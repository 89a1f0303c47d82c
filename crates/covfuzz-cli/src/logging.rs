//! Diagnostic logging setup
//!
//! Logs go to stderr so they never mix with score output on stdout.
//! `RUST_LOG` overrides the level picked from `-v`/`-q`.

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human readable
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

/// Filter used when `RUST_LOG` is unset or invalid
#[must_use]
pub fn default_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()))
}

/// Install the global subscriber. Returns false if one was already set.
pub fn init_tracing(verbosity: Verbosity, format: LogFormat) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(default_filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.is_ok()
}
