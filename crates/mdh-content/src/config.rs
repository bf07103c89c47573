//! Frame context configuration.

use mdh_bridge::BridgeConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default focus poll period.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Period of the authoritative focus poll.
    pub poll_interval: Duration,
    /// Run in nested frames too. Off by default; nested instances then
    /// stay permanently disabled.
    pub allow_nested_frames: bool,
    pub bridge: BridgeConfig,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            allow_nested_frames: false,
            bridge: BridgeConfig::default(),
        }
    }
}
