//! Tab Activation Monitor
//!
//! Relays host lifecycle and toolbar events to the frames of a tab.

use mdh_bridge::PrivilegedEndpoint;
use mdh_types::{MessageKind, TabId, TransportMessage};
use std::sync::Arc;
use tracing::{debug, info};

use crate::ports::{BrowserHost, ToolbarButton};

pub struct TabActivationMonitor {
    host: Arc<dyn BrowserHost>,
    button: Arc<dyn ToolbarButton>,
    frames: PrivilegedEndpoint,
}

impl TabActivationMonitor {
    pub fn new(
        host: Arc<dyn BrowserHost>,
        button: Arc<dyn ToolbarButton>,
        frames: PrivilegedEndpoint,
    ) -> Self {
        Self {
            host,
            button,
            frames,
        }
    }

    /// The tab came to the foreground. Returns the number of frames told.
    pub fn on_activate(&self, tab: TabId) -> usize {
        self.host.record_activation(tab);
        let reached = self.broadcast(tab, MessageKind::TabActivated);
        info!(tab = %tab, frames = reached, "Tab activated");
        reached
    }

    /// The tab went to the background.
    pub fn on_deactivate(&self, tab: TabId) -> usize {
        self.host.record_deactivation(tab);
        let reached = self.broadcast(tab, MessageKind::TabDeactivated);
        debug!(tab = %tab, frames = reached, "Tab deactivated");
        reached
    }

    /// Toolbar button or context menu pressed. Without an explicit tab the
    /// active tab receives the toggle.
    pub fn on_toolbar_command(&self, tab: Option<TabId>) -> usize {
        let Some(target) = tab.or_else(|| self.host.active_tab()) else {
            debug!("Toggle command with no target tab");
            return 0;
        };
        self.broadcast(target, MessageKind::MdhToggle)
    }

    /// The window wants the button state refreshed. Disables the button
    /// when no page is loaded in `tab`; otherwise leaves it alone. Returns
    /// whether the tab has a page.
    pub fn on_validate(&self, tab: TabId) -> bool {
        let has_page = self.host.tab_has_url(tab);
        if !has_page {
            self.button.set_enabled(false);
        }
        has_page
    }

    fn broadcast(&self, tab: TabId, kind: MessageKind) -> usize {
        // A tab without a live page has no frames; nothing to do
        self.frames.send_to_tab(tab, &TransportMessage::signal(kind))
    }
}
