//! # Markdown Here Shared Types
//!
//! Types exchanged between the privileged background context and the
//! per-frame content contexts.
//!
//! ## Design Principles
//!
//! - **One canonical protocol**: every frame→background request travels as a
//!   `request` message and is answered by exactly one `request-response`.
//! - **Closed action set**: [`Request`] is an exhaustive enumeration. An action
//!   tag outside that set is a [`ProtocolError`], never a silent drop.
//! - **Envelope identity**: the sender of a message is whatever the transport
//!   says it is ([`SenderInfo`]); payloads carry no identity fields.

pub mod entities;
pub mod envelope;
pub mod errors;
pub mod ipc;
pub mod preferences;

pub use entities::*;
pub use envelope::{RequestEnvelope, ResponseEnvelope, TransportMessage};
pub use errors::*;
pub use ipc::*;
pub use preferences::{HotkeyPreference, Preferences, HOTKEY_KEY, MAIN_CSS_KEY, SYNTAX_CSS_KEY};
