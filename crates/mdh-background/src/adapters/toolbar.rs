//! Shared toolbar toggle button

use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

use crate::ports::ToolbarButton;

/// Process-wide button state. Starts disabled.
#[derive(Debug, Default)]
pub struct SharedToggleButton {
    enabled: AtomicBool,
}

impl SharedToggleButton {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ToolbarButton for SharedToggleButton {
    fn set_enabled(&self, enabled: bool) {
        let previous = self.enabled.swap(enabled, Ordering::SeqCst);
        if previous != enabled {
            debug!(enabled = enabled, "Toggle button state changed");
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }
}
