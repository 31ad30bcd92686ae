//! Structured logging bootstrap using `tracing`.

use anyhow::Result;
use serde::Deserialize;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Output shape of log events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parse the `LOG_FORMAT` value, falling back to pretty output.
    pub fn from_env_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Install a global tracing subscriber with sensible defaults.
pub fn init_tracing(format: LogFormat) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    let timer = fmt::time::UtcTime::rfc_3339();

    match format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_target(true)
                .with_timer(timer)
                .with_level(true)
                .with_line_number(true)
                .with_file(true)
                .with_writer(std::io::stderr)
                .with_filter(env_filter);
            tracing_subscriber::registry().with(fmt_layer).init();
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_timer(timer)
                .with_writer(std::io::stderr)
                .with_filter(env_filter);
            tracing_subscriber::registry().with(fmt_layer).init();
        }
    }

    tracing::debug!(level = ?Level::INFO, ?format, "tracing initialised");
    Ok(())
}
