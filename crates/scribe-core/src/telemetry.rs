//! Logging initialization.
//!
//! Installs a `tracing` subscriber with an `EnvFilter` and either a
//! human-readable or JSON formatter.

use crate::{ScribeError, ScribeResult};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Telemetry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name attached to log records.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Default filter directive (trace, debug, info, warn, error).
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: `pretty` or `json`.
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_service_name() -> String {
    "scribe".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl TelemetryConfig {
    /// Returns true if logs should be emitted as JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// Builds the env filter: `RUST_LOG` if set, otherwise the configured level.
pub fn build_env_filter(config: &TelemetryConfig) -> ScribeResult<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| ScribeError::Configuration(format!("Invalid log filter: {}", e)))
}

/// Installs the global tracing subscriber.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(config: &TelemetryConfig) -> ScribeResult<()> {
    let filter = build_env_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.is_json() {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };

    result.map_err(|e| ScribeError::Internal(format!("Failed to install tracing subscriber: {}", e)))?;

    tracing::info!(service = %config.service_name, "Tracing initialized");
    Ok(())
}
