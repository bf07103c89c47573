//! # IPC Message Types
//!
//! The closed set of message kinds and request actions.
//!
//! | direction | kind | body |
//! |-----------|------|------|
//! | frame → background | `request` | [`RequestEnvelope`](crate::RequestEnvelope) |
//! | background → frame | `request-response` | [`ResponseEnvelope`](crate::ResponseEnvelope) |
//! | background → frame | `tab-activated` | none |
//! | background → frame | `tab-deactivated` | none |
//! | background → frame | `mdh-toggle` | none |

use crate::errors::ProtocolError;
use crate::preferences::Preferences;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel returned for `test-request`.
pub const TEST_REQUEST_GOOD: &str = "test-request-good";

/// Transport-level message kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Request,
    RequestResponse,
    TabActivated,
    TabDeactivated,
    MdhToggle,
}

impl MessageKind {
    /// Wire name of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Request => "request",
            MessageKind::RequestResponse => "request-response",
            MessageKind::TabActivated => "tab-activated",
            MessageKind::TabDeactivated => "tab-deactivated",
            MessageKind::MdhToggle => "mdh-toggle",
        }
    }

    /// Parse a wire name.
    pub fn parse(name: &str) -> Result<Self, ProtocolError> {
        match name {
            "request" => Ok(MessageKind::Request),
            "request-response" => Ok(MessageKind::RequestResponse),
            "tab-activated" => Ok(MessageKind::TabActivated),
            "tab-deactivated" => Ok(MessageKind::TabDeactivated),
            "mdh-toggle" => Ok(MessageKind::MdhToggle),
            other => Err(ProtocolError::UnmatchedKind(other.to_string())),
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A frame → background request, tagged on the wire by `action`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Request {
    /// Render Markdown text with the current preferences.
    Render {
        #[serde(rename = "mdText")]
        md_text: String,
    },
    /// Read all preferences.
    GetOptions,
    /// Merge the given preferences into the store.
    SetOptions { options: Preferences },
    /// Remove the given preference keys.
    RemoveOptions {
        #[serde(rename = "arrayOfKeys")]
        array_of_keys: Vec<String>,
    },
    /// Enable or disable the shared toolbar toggle button.
    ShowToggleButton { show: bool },
    /// Fetch the "forgot to render" prompt fragment.
    GetForgotToRenderPrompt,
    /// Liveness probe.
    TestRequest,
}

impl Request {
    /// Every action tag the background understands.
    pub const ACTIONS: [&'static str; 7] = [
        "render",
        "get-options",
        "set-options",
        "remove-options",
        "show-toggle-button",
        "get-forgot-to-render-prompt",
        "test-request",
    ];

    /// Wire tag of this request's action.
    #[must_use]
    pub fn action_name(&self) -> &'static str {
        match self {
            Request::Render { .. } => "render",
            Request::GetOptions => "get-options",
            Request::SetOptions { .. } => "set-options",
            Request::RemoveOptions { .. } => "remove-options",
            Request::ShowToggleButton { .. } => "show-toggle-button",
            Request::GetForgotToRenderPrompt => "get-forgot-to-render-prompt",
            Request::TestRequest => "test-request",
        }
    }

    /// Whether callers normally wait for the answer. `show-toggle-button`
    /// is sent fire-and-forget; it is answered all the same.
    #[must_use]
    pub fn expects_response(&self) -> bool {
        !matches!(self, Request::ShowToggleButton { .. })
    }

    #[must_use]
    pub fn is_known_action(action: &str) -> bool {
        Self::ACTIONS.contains(&action)
    }
}

/// Response payload for `render`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResponse {
    pub html: String,
    pub css: String,
}

/// Response payload for `get-forgot-to-render-prompt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptResponse {
    pub html: String,
}
