//! Domain layer

pub mod dom;
pub mod focus;
pub mod hotkey;
pub mod listeners;

pub use dom::{
    key_code, DocumentId, ElementId, FocusCandidate, KeyDisposition, KeyEvent, ListenerKind,
};
pub use focus::{Evaluation, FocusTracker, RenderabilityLatch};
pub use hotkey::HotkeyBinder;
pub use listeners::ListenerSet;
