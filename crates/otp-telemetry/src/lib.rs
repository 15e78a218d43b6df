//! # OTP Telemetry
//!
//! Structured logging for hosts embedding the OTP handshake SDK.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use otp_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     init_logging(&TelemetryConfig::from_env()).expect("Failed to init logging");
//!     // Handshake and inbound events are now logged
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `otp-handshake` | Service name in logs |
//! | `OTP_LOG_LEVEL` | `info` | Log level filter |
//! | `OTP_JSON_LOGS` | `false` | JSON output |
//! | `OTP_CONSOLE_OUTPUT` | `true` | Console output |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{init_logging, init_test_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Global subscriber already initialized: {0}")]
    AlreadyInitialized(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
