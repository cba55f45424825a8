//! # Gauge Emission Telemetry
//!
//! Logging bootstrap and event counters shared by hosts embedding the gauge
//! and minter.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ge_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GE_SERVICE_NAME` | `gauge-emission` | Service name in logs |
//! | `GE_LOG_LEVEL` / `RUST_LOG` | `info` | `EnvFilter` directive |
//! | `GE_JSON_LOGS` | `false` | JSON output |
//! | `GE_LOG_TARGET` | `true` | Include event targets |

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{EventMetrics, MeteredSink};
pub use shared_types::EventKind;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
