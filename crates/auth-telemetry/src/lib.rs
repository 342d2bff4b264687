//! # Auth Telemetry
//!
//! Logging bootstrap for the service-auth binaries.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use auth_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging(&TelemetryConfig::from_env())?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `AUTH_LOG_LEVEL` / `RUST_LOG` | `info` | `EnvFilter` directives |
//! | `AUTH_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |
//! | `AUTH_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `AUTH_SERVICE_NAME` | `service-auth` | Recorded in the startup event |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("Failed to install global subscriber: {0}")]
    SubscriberInit(String),
}
