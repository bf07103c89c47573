//! Bridge error types.

use mdh_types::{ProtocolError, RequestId};
use thiserror::Error;

/// Errors from the raw transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The peer endpoint no longer exists.
    #[error("peer disconnected")]
    Disconnected,

    /// No frame is registered under the given address.
    #[error("unknown destination: {0}")]
    UnknownDestination(String),
}

/// Errors surfaced to a request's completion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The configured request timeout elapsed before a response arrived.
    #[error("request {request_id} timed out after {timeout_ms}ms")]
    TimedOut { request_id: RequestId, timeout_ms: u128 },

    /// A request with this id is still outstanding.
    #[error("request id {0} is already pending")]
    DuplicateRequestId(RequestId),

    /// The pending entry was dropped without being completed.
    #[error("request {0} was abandoned")]
    Abandoned(RequestId),

    /// The response payload did not have the expected shape.
    #[error("unexpected response payload: {0}")]
    UnexpectedPayload(String),
}
