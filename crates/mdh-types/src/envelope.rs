//! # Envelopes
//!
//! The raw transport unit ([`TransportMessage`]) and the two structured
//! envelopes carried inside it.
//!
//! ## Correlation
//!
//! - A request carries a `requestID` that is never reused while a response to
//!   it is outstanding.
//! - A response echoes that `requestID`. At most one response is produced per
//!   request; a response whose id is unknown to the receiver is a no-op.

use crate::entities::RequestId;
use crate::errors::ProtocolError;
use crate::ipc::{MessageKind, Request};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What actually crosses the transport: a kind name plus an opaque body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportMessage {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
}

impl TransportMessage {
    /// A body-less message of the given kind.
    #[must_use]
    pub fn signal(kind: MessageKind) -> Self {
        Self {
            name: kind.as_str().to_string(),
            message: None,
        }
    }

    /// Wrap a request envelope as a `request` message.
    pub fn request(envelope: &RequestEnvelope) -> Result<Self, ProtocolError> {
        let body = serde_json::to_value(envelope)
            .map_err(|e| ProtocolError::malformed(MessageKind::Request.as_str(), e))?;
        Ok(Self {
            name: MessageKind::Request.as_str().to_string(),
            message: Some(body),
        })
    }

    /// Wrap a response envelope as a `request-response` message.
    pub fn response(envelope: &ResponseEnvelope) -> Result<Self, ProtocolError> {
        let body = serde_json::to_value(envelope)
            .map_err(|e| ProtocolError::malformed(MessageKind::RequestResponse.as_str(), e))?;
        Ok(Self {
            name: MessageKind::RequestResponse.as_str().to_string(),
            message: Some(body),
        })
    }

    /// Parse the message name.
    pub fn kind(&self) -> Result<MessageKind, ProtocolError> {
        MessageKind::parse(&self.name)
    }
}

/// A correlated request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    #[serde(flatten)]
    pub request: Request,
    #[serde(rename = "requestID")]
    pub request_id: RequestId,
}

impl RequestEnvelope {
    #[must_use]
    pub fn new(request: Request, request_id: RequestId) -> Self {
        Self {
            request,
            request_id,
        }
    }

    /// Decode the body of a `request` message.
    ///
    /// An `action` outside the closed set is reported as
    /// [`ProtocolError::UnmatchedAction`] so that version skew between the
    /// contexts is visible.
    pub fn decode(body: Option<&Value>) -> Result<Self, ProtocolError> {
        let kind = MessageKind::Request.as_str();
        let body = body.ok_or_else(|| ProtocolError::malformed(kind, "missing body"))?;
        let action = body
            .get("action")
            .and_then(Value::as_str)
            .ok_or_else(|| ProtocolError::malformed(kind, "missing action"))?;
        if !Request::is_known_action(action) {
            return Err(ProtocolError::UnmatchedAction(action.to_string()));
        }
        serde_json::from_value(body.clone()).map_err(|e| ProtocolError::malformed(kind, e))
    }
}

/// A response to one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "requestID")]
    pub request_id: RequestId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

impl ResponseEnvelope {
    #[must_use]
    pub fn new(request_id: RequestId, response: Option<Value>) -> Self {
        Self {
            request_id,
            response,
        }
    }

    /// Response with no payload.
    #[must_use]
    pub fn empty(request_id: RequestId) -> Self {
        Self::new(request_id, None)
    }

    /// Decode the body of a `request-response` message.
    pub fn decode(body: Option<&Value>) -> Result<Self, ProtocolError> {
        let kind = MessageKind::RequestResponse.as_str();
        let body = body.ok_or_else(|| ProtocolError::malformed(kind, "missing body"))?;
        serde_json::from_value(body.clone()).map_err(|e| ProtocolError::malformed(kind, e))
    }
}
