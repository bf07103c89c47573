//! Context Bridge - request/response RPC over a fire-and-forget transport.
//!
//! ```text
//!  caller ──send()──▶ ContextBridge ──register──▶ PendingRequestTable
//!                          │                             ▲
//!                          ▼ deliver(request)            │ complete(requestID)
//!                      Transport ─────────▶ peer ──▶ request-response
//! ```
//!
//! Completions may arrive in any order; each resolves only its own id.

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::pending::{cleanup_task, Completion, PendingRequestTable, ResponseCallback, ResponseResult};
use crate::transport::Transport;
use mdh_types::{MessageKind, Request, RequestEnvelope, RequestId, ResponseEnvelope, TransportMessage};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Result of routing one inbound transport message.
#[derive(Debug, PartialEq)]
pub enum Routed {
    /// A `request-response` the bridge handled itself.
    Consumed,
    /// A message of another known kind, for the caller to handle.
    Forward(MessageKind, TransportMessage),
    /// A message whose name is not a known kind.
    Unknown(TransportMessage),
}

/// Requesting side of the protocol. One instance per context.
pub struct ContextBridge {
    transport: Arc<dyn Transport>,
    pending: Arc<PendingRequestTable>,
    config: BridgeConfig,
}

impl ContextBridge {
    pub fn new(transport: Arc<dyn Transport>, config: BridgeConfig) -> Self {
        Self {
            transport,
            pending: Arc::new(PendingRequestTable::new()),
            config,
        }
    }

    /// Send a request. Returns immediately with the generated id.
    ///
    /// With `on_complete == None` no pending entry is created and any
    /// response is dropped on arrival.
    pub fn send(&self, request: Request, on_complete: Option<ResponseCallback>) -> RequestId {
        let request_id = RequestId::generate();
        // Transport failures have already reached the callback
        let _ = self.send_with_id(request_id.clone(), request, on_complete.map(Completion::Callback));
        request_id
    }

    /// Send with a callback.
    pub fn send_with<F>(&self, request: Request, on_complete: F) -> RequestId
    where
        F: FnOnce(ResponseResult) + Send + 'static,
    {
        self.send(request, Some(Box::new(on_complete)))
    }

    /// Fire-and-forget send.
    pub fn notify(&self, request: Request) -> RequestId {
        self.send(request, None)
    }

    /// Send under a caller-chosen id.
    ///
    /// Fails with `DuplicateRequestId` if that id is still outstanding. Every
    /// failure, whether encoding, duplicate id or transport, is delivered to
    /// the completion as well as returned.
    pub fn send_with_id(
        &self,
        request_id: RequestId,
        request: Request,
        completion: Option<Completion>,
    ) -> Result<(), BridgeError> {
        let action = request.action_name();
        let envelope = RequestEnvelope::new(request, request_id.clone());
        let message = match TransportMessage::request(&envelope) {
            Ok(message) => message,
            Err(e) => return Self::reject(&request_id, action, completion, BridgeError::Protocol(e)),
        };
        if completion.is_some() && self.pending.is_pending(&request_id) {
            let error = BridgeError::DuplicateRequestId(request_id.clone());
            return Self::reject(&request_id, action, completion, error);
        }

        let tracked = completion.is_some();
        if let Some(completion) = completion {
            self.pending
                .register(request_id.clone(), action, completion, self.config.request_timeout)?;
        }

        if let Err(e) = self.transport.deliver(message) {
            warn!(request_id = %request_id, action = action, error = %e, "Request delivery failed");
            if tracked {
                self.pending.fail(&request_id, BridgeError::Transport(e.clone()));
            }
            return Err(BridgeError::Transport(e));
        }

        debug!(request_id = %request_id, action = action, tracked = tracked, "Sent request");
        Ok(())
    }

    /// A request that never reached the transport: log it and hand the
    /// error to the completion as well as to the caller.
    fn reject(
        request_id: &RequestId,
        action: &'static str,
        completion: Option<Completion>,
        error: BridgeError,
    ) -> Result<(), BridgeError> {
        warn!(request_id = %request_id, action = action, error = %error, "Request not sent");
        if let Some(completion) = completion {
            completion.resolve(Err(error.clone()));
        }
        Err(error)
    }

    /// Send and await the response payload.
    ///
    /// With no timeout configured this waits for as long as the response
    /// takes.
    pub async fn request(&self, request: Request) -> ResponseResult {
        let request_id = RequestId::generate();
        let (tx, rx) = oneshot::channel();
        self.send_with_id(request_id.clone(), request, Some(Completion::Channel(tx)))?;

        let outcome = match self.config.request_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, rx).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    self.pending.cancel(&request_id);
                    return Err(BridgeError::TimedOut {
                        request_id,
                        timeout_ms: timeout.as_millis(),
                    });
                }
            },
            None => rx.await,
        };
        outcome.unwrap_or(Err(BridgeError::Abandoned(request_id)))
    }

    /// Send and decode the response payload as `T`. An absent payload is
    /// decoded from `null`.
    pub async fn request_as<T: DeserializeOwned>(&self, request: Request) -> Result<T, BridgeError> {
        let payload = self.request(request).await?;
        serde_json::from_value(payload.unwrap_or(Value::Null))
            .map_err(|e| BridgeError::UnexpectedPayload(e.to_string()))
    }

    /// Resolve the pending entry for a response. Unknown ids are ignored.
    pub fn handle_response(&self, envelope: ResponseEnvelope) -> bool {
        self.pending.complete(&envelope.request_id, envelope.response)
    }

    /// Route one inbound message.
    pub fn route(&self, message: TransportMessage) -> Routed {
        match message.kind() {
            Ok(MessageKind::RequestResponse) => {
                match ResponseEnvelope::decode(message.message.as_ref()) {
                    Ok(envelope) => {
                        self.handle_response(envelope);
                    }
                    Err(e) => warn!(error = %e, "Dropping malformed response"),
                }
                Routed::Consumed
            }
            Ok(kind) => Routed::Forward(kind, message),
            Err(_) => Routed::Unknown(message),
        }
    }

    /// Spawn the expiry sweeper when a timeout is configured.
    pub fn spawn_expiry_sweeper(&self) -> Option<JoinHandle<()>> {
        self.config.request_timeout?;
        let table = self.pending.clone();
        Some(tokio::spawn(cleanup_task(table, self.config.cleanup_interval)))
    }

    pub fn pending(&self) -> &Arc<PendingRequestTable> {
        &self.pending
    }

    pub fn pending_count(&self) -> usize {
        self.pending.pending_count()
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
}
