//! # Error Types
//!
//! Protocol-level errors shared by both contexts.

use thiserror::Error;

/// A message that does not fit the protocol.
///
/// These indicate a version mismatch between the two contexts and are raised
/// loudly by the privileged side rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The transport message name is not one of the known kinds.
    #[error("unmatched request name: {0}")]
    UnmatchedKind(String),

    /// The request's `action` tag is not in the closed action set.
    #[error("unmatched request action: {0}")]
    UnmatchedAction(String),

    /// The message has a known kind but its body could not be decoded.
    #[error("malformed {kind} message: {reason}")]
    MalformedEnvelope { kind: String, reason: String },
}

impl ProtocolError {
    pub(crate) fn malformed(kind: &str, reason: impl ToString) -> Self {
        Self::MalformedEnvelope {
            kind: kind.to_string(),
            reason: reason.to_string(),
        }
    }
}
