//! # Push Telemetry
//!
//! Logging and metrics for Push-Gateway.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with `EnvFilter`, pretty or JSON output
//! - **Metrics**: Prometheus counters for envelopes, signatures and handlers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use push_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! let _guard = init_telemetry(&config).expect("Failed to init telemetry");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `push-gateway` | Service name in logs |
//! | `PG_LOG_LEVEL` | `info` | Log level filter |
//! | `PG_JSON_LOGS` | `false` | JSON log lines |
//! | `PG_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{env_filter, init_logging};
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, DECRYPT_FAILURES, ENVELOPES_OPENED,
    ENVELOPES_SEALED, HANDLER_FAILURES, PHONE_DECRYPTIONS, PUSH_MESSAGES, SIGNATURE_FAILURES,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Global subscriber could not be installed
    #[error("Failed to initialize logger: {0}")]
    LoggerInit(String),

    /// Prometheus registration or encoding failed
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that must be held for the lifetime of the application.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let metrics_handle = register_metrics()?;
    init_logging(config)?;

    Ok(TelemetryGuard {
        _metrics: metrics_handle,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
