//! Outbound Ports (Driven Ports)
//!
//! Collaborators the dispatcher and monitor depend on. None of them share
//! state with a frame context.

use async_trait::async_trait;
use mdh_types::{Preferences, TabId};

use crate::error::StoreError;

/// Markdown-to-HTML rendering engine.
pub trait MarkdownRenderer: Send + Sync {
    /// Render `md_text` under the given preferences. Must be deterministic.
    fn render(&self, md_text: &str, prefs: &Preferences) -> String;
}

/// Persistent preference storage.
#[async_trait]
pub trait OptionsStore: Send + Sync {
    /// Current preferences, defaults merged in.
    async fn get(&self) -> Result<Preferences, StoreError>;

    /// Merge the given preferences into the store.
    async fn set(&self, options: Preferences) -> Result<(), StoreError>;

    /// Remove the given keys; removed keys fall back to their defaults.
    async fn remove(&self, keys: &[String]) -> Result<(), StoreError>;
}

/// Source of the "forgot to render" prompt fragment.
#[async_trait]
pub trait PromptProvider: Send + Sync {
    async fn forgot_to_render_prompt(&self) -> String;
}

/// The single shared toolbar toggle button.
pub trait ToolbarButton: Send + Sync {
    fn set_enabled(&self, enabled: bool);
    fn is_enabled(&self) -> bool;
}

/// What the browser knows about its tabs.
pub trait BrowserHost: Send + Sync {
    /// Tab currently in the foreground, if any.
    fn active_tab(&self) -> Option<TabId>;

    /// Whether a page is loaded in the tab.
    fn tab_has_url(&self, tab: TabId) -> bool;

    /// Lifecycle hooks for hosts that track activation themselves.
    fn record_activation(&self, _tab: TabId) {}

    fn record_deactivation(&self, _tab: TabId) {}
}
