//! # Runtime Configuration
//!
//! Defaults with environment overrides, checked by [`RuntimeConfig::validate`]
//! before anything starts.

use mdh_bridge::{BridgeConfig, DEFAULT_CLEANUP_INTERVAL};
use mdh_content::{ContentConfig, DEFAULT_POLL_INTERVAL};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Focus poll period of every content script.
    pub poll_interval: Duration,
    /// Pending request timeout; `None` waits forever.
    pub request_timeout: Option<Duration>,
    /// Expiry sweep period, used only with a timeout.
    pub cleanup_interval: Duration,
    /// Run content scripts in nested frames too.
    pub allow_nested_frames: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: None,
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            allow_nested_frames: false,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Poll interval must be greater than zero")]
    ZeroPollInterval,

    #[error("Request timeout must be greater than zero; unset it to wait forever")]
    ZeroRequestTimeout,

    #[error("Cleanup interval must be greater than zero")]
    ZeroCleanupInterval,
}

impl RuntimeConfig {
    /// Load from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `MDH_POLL_INTERVAL_MS` (default: 2000)
    /// - `MDH_REQUEST_TIMEOUT_MS` (default: unset, no timeout)
    /// - `MDH_CLEANUP_INTERVAL_MS` (default: 1000)
    /// - `MDH_ALLOW_NESTED_FRAMES` (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable source. Unparseable values are
    /// logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(ms) = millis(&lookup, "MDH_POLL_INTERVAL_MS") {
            config.poll_interval = ms;
        }
        if let Some(ms) = millis(&lookup, "MDH_REQUEST_TIMEOUT_MS") {
            config.request_timeout = Some(ms);
        }
        if let Some(ms) = millis(&lookup, "MDH_CLEANUP_INTERVAL_MS") {
            config.cleanup_interval = ms;
        }
        if let Some(value) = lookup("MDH_ALLOW_NESTED_FRAMES") {
            config.allow_nested_frames = value.eq_ignore_ascii_case("true") || value == "1";
        }

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.request_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::ZeroRequestTimeout);
        }
        if self.cleanup_interval.is_zero() {
            return Err(ConfigError::ZeroCleanupInterval);
        }
        Ok(())
    }

    pub fn bridge_config(&self) -> BridgeConfig {
        BridgeConfig {
            request_timeout: self.request_timeout,
            cleanup_interval: self.cleanup_interval,
        }
    }

    pub fn content_config(&self) -> ContentConfig {
        ContentConfig {
            poll_interval: self.poll_interval,
            allow_nested_frames: self.allow_nested_frames,
            bridge: self.bridge_config(),
        }
    }
}

fn millis<F>(lookup: &F, key: &str) -> Option<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(ms) => Some(Duration::from_millis(ms)),
        Err(_) => {
            warn!(var = key, value = %raw, "Ignoring non-numeric value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::from_lookup(lookup(&[]));
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.cleanup_interval, Duration::from_secs(1));
        assert!(!config.allow_nested_frames);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("MDH_POLL_INTERVAL_MS", "500"),
            ("MDH_REQUEST_TIMEOUT_MS", "3000"),
            ("MDH_CLEANUP_INTERVAL_MS", "250"),
            ("MDH_ALLOW_NESTED_FRAMES", "true"),
        ]));
        assert_eq!(config.poll_interval, Duration::from_millis(500));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(3)));

        let content = config.content_config();
        assert!(content.allow_nested_frames);
        assert_eq!(content.bridge.cleanup_interval, Duration::from_millis(250));
        assert_eq!(content.bridge.request_timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_garbage_is_ignored() {
        let config = RuntimeConfig::from_lookup(lookup(&[("MDH_POLL_INTERVAL_MS", "soon")]));
        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
    }

    #[test]
    fn test_validate_rejects_zero() {
        let zero_poll = RuntimeConfig {
            poll_interval: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(zero_poll.validate(), Err(ConfigError::ZeroPollInterval));

        let zero_timeout = RuntimeConfig::from_lookup(lookup(&[("MDH_REQUEST_TIMEOUT_MS", "0")]));
        assert_eq!(zero_timeout.validate(), Err(ConfigError::ZeroRequestTimeout));

        let zero_sweep = RuntimeConfig {
            cleanup_interval: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(zero_sweep.validate(), Err(ConfigError::ZeroCleanupInterval));
    }
}
