//! # Markdown Here Content
//!
//! The frame context: one [`ContentScript`] per tab frame.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`)
//!   - `FocusTracker` + `RenderabilityLatch`: which element is focused, and
//!     when the toggle button must change
//!   - `HotkeyBinder`: lazy per-document `keydown` binding
//!   - `ListenerSet`: at-most-once listener registry
//!
//! - **Ports Layer** (`ports/`): `DomHost`, `MarkdownToggle`,
//!   `ForgotToRenderCheck`
//!
//! - **Adapters Layer** (`adapters/`): `MemoryDom`, an in-memory page
//!
//! - **Service Layer** (`service`): `ContentScript` wires the above to a
//!   [`ContextBridge`](mdh_bridge::ContextBridge)
//!
//! ## Focus Detection
//!
//! The poll is authoritative; focus events only make it faster. Focus
//! events do not cross nested frame boundaries reliably, so a state change
//! must never depend on one arriving.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{MemoryDom, NoForgotToRenderCheck};
pub use config::{ContentConfig, DEFAULT_POLL_INTERVAL};
pub use domain::{
    key_code, DocumentId, ElementId, Evaluation, FocusCandidate, FocusTracker, HotkeyBinder,
    KeyDisposition, KeyEvent, ListenerKind, ListenerSet, RenderabilityLatch,
};
pub use ports::{DomHost, ForgotToRenderCheck, MarkdownToggle, ToggleStart};
pub use service::{ContentScript, NOT_RENDERABLE_MESSAGE};
