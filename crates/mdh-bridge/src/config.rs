//! Bridge configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default interval between expiry sweeps.
pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for one [`ContextBridge`](crate::ContextBridge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Upper bound on how long a pending request may wait for its response.
    ///
    /// `None` keeps pending entries until answered, however long that takes.
    pub request_timeout: Option<Duration>,
    /// How often the expiry sweeper runs when a timeout is configured.
    pub cleanup_interval: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            request_timeout: None,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
        }
    }
}

impl BridgeConfig {
    /// Same configuration with a request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}
