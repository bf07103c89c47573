//! Outbound Ports (Driven Ports)
//!
//! What the frame context needs from its page.

use mdh_types::Preferences;

use crate::domain::{DocumentId, FocusCandidate, ListenerKind};

/// The page's DOM.
pub trait DomHost: Send + Sync {
    /// The top-level document of this frame context.
    fn top_document(&self) -> DocumentId;

    /// The focused element, descending into nested frame documents.
    fn focused_element(&self) -> Option<FocusCandidate>;

    /// Whether the element is a valid render target. False for elements
    /// that no longer exist.
    fn is_renderable(&self, candidate: &FocusCandidate) -> bool;

    /// Install a document-level listener. Called at most once per pair.
    fn add_event_listener(&self, document: DocumentId, kind: ListenerKind);

    /// Blocking user notification.
    fn alert(&self, message: &str);
}

/// How a toggle starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleStart {
    /// Markdown text to send for rendering.
    Render { md_text: String },
    /// The element was already rendered and has been restored.
    Reverted,
}

/// Markdown toggling of one element.
pub trait MarkdownToggle: Send + Sync {
    /// Start toggling. `Err` carries a message for the user.
    fn begin(&self, target: &FocusCandidate) -> Result<ToggleStart, String>;

    /// Replace the element content with the rendered result.
    fn complete(&self, target: &FocusCandidate, html: &str, css: &str);
}

/// Periodic "forgot to render" heuristic.
pub trait ForgotToRenderCheck: Send + Sync {
    fn check(&self, _focused: &FocusCandidate, _prefs: &Preferences) {}
}
