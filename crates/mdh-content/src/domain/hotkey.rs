//! Hotkey Binder
//!
//! Configured once from preferences. When active, every poll binds a
//! `keydown` listener to the focused element's document; nested frame
//! documents come and go, so they cannot be enumerated up front.

use mdh_types::{HotkeyPreference, Preferences};

use super::dom::{key_code, DocumentId, KeyEvent, ListenerKind};
use super::listeners::ListenerSet;

#[derive(Debug, Clone, Default)]
pub enum HotkeyBinder {
    /// No usable hotkey configured; binding is a no-op.
    #[default]
    Disabled,
    Active {
        combo: HotkeyPreference,
        /// Key code the combination's key produces.
        which: u32,
        bound: ListenerSet,
    },
}

impl HotkeyBinder {
    /// Active only if the configured key is exactly one character.
    pub fn from_preferences(prefs: &Preferences) -> Self {
        match prefs.hotkey() {
            Some(combo) => Self::from_combo(combo),
            None => Self::Disabled,
        }
    }

    pub fn from_combo(combo: HotkeyPreference) -> Self {
        let mut chars = combo.key.chars();
        let (Some(key), None) = (chars.next(), chars.next()) else {
            return Self::Disabled;
        };
        Self::Active {
            combo,
            which: key_code(key),
            bound: ListenerSet::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Bind the listener to `document`. True if a listener must be
    /// installed now; false when disabled or already bound.
    pub fn bind(&mut self, document: DocumentId) -> bool {
        match self {
            Self::Disabled => false,
            Self::Active { bound, .. } => bound.attach(document, ListenerKind::KeyDown),
        }
    }

    pub fn is_bound(&self, document: DocumentId) -> bool {
        match self {
            Self::Disabled => false,
            Self::Active { bound, .. } => bound.contains(document, ListenerKind::KeyDown),
        }
    }

    /// Exact match of modifiers and key, in a bound document.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        match self {
            Self::Disabled => false,
            Self::Active {
                combo,
                which,
                bound,
            } => {
                bound.contains(event.document, ListenerKind::KeyDown)
                    && event.shift_key == combo.shift_key
                    && event.ctrl_key == combo.ctrl_key
                    && event.alt_key == combo.alt_key
                    && event.which == *which
            }
        }
    }
}
