//! Error types for the privileged context

use mdh_bridge::TransportError;
use mdh_types::ProtocolError;
use thiserror::Error;

/// Errors reported by the preference store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Preference store unavailable: {0}")]
    Unavailable(String),

    #[error("Preference value rejected for key {key}: {reason}")]
    Rejected { key: String, reason: String },
}

/// Errors from handling one inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Unknown message kind or action; fatal for that message.
    #[error("Protocol violation: {0}")]
    Protocol(#[from] ProtocolError),

    /// The response could not be delivered back to its sender.
    #[error("Response delivery failed: {0}")]
    Transport(#[from] TransportError),
}
