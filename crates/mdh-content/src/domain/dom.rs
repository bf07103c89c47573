//! DOM handles as seen by the frame context.
//!
//! Handles are plain ids. Holding one never keeps the element alive; every
//! use re-checks against the live DOM.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

/// Handle to one document (the top page or a nested frame's document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "elem-{}", self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc-{}", self.0)
    }
}

/// The element currently considered for rendering, with its owning document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FocusCandidate {
    pub element: ElementId,
    pub document: DocumentId,
}

impl FocusCandidate {
    pub fn new(element: ElementId, document: DocumentId) -> Self {
        Self { element, document }
    }
}

impl fmt::Display for FocusCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.element, self.document)
    }
}

/// Document-level listeners the frame context installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerKind {
    /// Capturing `focus` listener.
    Focus,
    /// `keydown` listener for the hotkey.
    KeyDown,
}

/// A `keydown` event as delivered to a document listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub document: DocumentId,
    pub shift_key: bool,
    pub ctrl_key: bool,
    pub alt_key: bool,
    /// Legacy key code: the upper-case code point for letter keys.
    pub which: u32,
}

/// Legacy key code of `key`: its upper-case code point. Characters whose
/// upper case spans several code points keep their own.
pub fn key_code(key: char) -> u32 {
    let mut upper = key.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single as u32,
        _ => key as u32,
    }
}

impl KeyEvent {
    /// Unmodified press of `key` in `document`.
    pub fn key(document: DocumentId, key: char) -> Self {
        Self {
            document,
            shift_key: false,
            ctrl_key: false,
            alt_key: false,
            which: key_code(key),
        }
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_key = true;
        self
    }

    #[must_use]
    pub fn with_alt(mut self) -> Self {
        self.alt_key = true;
        self
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.shift_key = true;
        self
    }
}

/// What the listener tells the browser to do with a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// The hotkey matched; suppress the browser's default handling.
    PreventDefault,
    Pass,
}
