//! # Context Identities
//!
//! Identifiers for tabs, frames and correlation tokens.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Host-assigned tab identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

/// Frame identifier within a tab. The top-level frame is always [`FrameId::TOP`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameId(pub u64);

impl FrameId {
    /// The tab's top-level frame.
    pub const TOP: FrameId = FrameId(0);

    #[must_use]
    pub fn is_top(&self) -> bool {
        *self == Self::TOP
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame-{}", self.0)
    }
}

/// Origin of a message as reported by the transport.
///
/// This is the sole authority for "who sent this"; the privileged side uses
/// it for the active-tab check on `show-toggle-button`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SenderInfo {
    pub tab: TabId,
    pub frame: FrameId,
}

impl SenderInfo {
    #[must_use]
    pub fn new(tab: TabId, frame: FrameId) -> Self {
        Self { tab, frame }
    }

    /// Sender for the top-level frame of `tab`.
    #[must_use]
    pub fn top(tab: TabId) -> Self {
        Self::new(tab, FrameId::TOP)
    }

    #[must_use]
    pub fn is_top_frame(&self) -> bool {
        self.frame.is_top()
    }
}

impl fmt::Display for SenderInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.tab, self.frame)
    }
}

/// Correlation token pairing a request with its eventual response.
///
/// Generated tokens are UUID v7 strings, so they are unique for the lifetime
/// of the sending context and sort by creation time. Arbitrary tokens received
/// off the wire are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a fresh token.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self {
        Self(value)
    }
}
