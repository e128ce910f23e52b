//! Tracing initialisation
//!
//! Installs a global `tracing` subscriber filtered by `RUST_LOG` (falling
//! back to the given level) and writing either compact lines or JSON.

use conex_domain::{ConexError, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Log line format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single lines
    #[default]
    Compact,
    /// One JSON object per event, for log shippers
    Json,
}

/// Install the global subscriber
///
/// # Arguments
/// * `default_level` - Filter used when `RUST_LOG` is unset or invalid,
///   e.g. `"info"` or `"conex_infra=debug,info"`
/// * `format` - Output format
///
/// # Errors
/// Returns `ConexError::Config` if a global subscriber is already set
pub fn init_tracing(default_level: &str, format: LogFormat) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match format {
        LogFormat::Compact => registry.with(fmt::layer().compact().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .flatten_event(true),
            )
            .try_init(),
    };

    result.map_err(|e| ConexError::Config(format!("Failed to initialise tracing: {e}")))
}
