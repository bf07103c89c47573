//! # Markdown Here Telemetry
//!
//! Structured logging for every context. Call [`init_logging`] once at
//! startup, before any other crate logs.
//!
//! ```rust,ignore
//! use mdh_telemetry::{init_logging, LogConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_logging(&LogConfig::from_env())?;
//!     tracing::info!("ready");
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `MDH_LOG_LEVEL` | `info` | Filter directive used when `RUST_LOG` is unset |
//! | `RUST_LOG` | unset | Takes precedence over `MDH_LOG_LEVEL` |
//! | `MDH_LOG_JSON` | `false` | One JSON object per line |

mod config;
mod logging;

pub use config::LogConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid log filter {directive:?}: {reason}")]
    InvalidFilter { directive: String, reason: String },

    #[error("Failed to install log subscriber: {0}")]
    SubscriberInit(String),
}
