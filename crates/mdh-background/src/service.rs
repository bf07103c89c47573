//! Background Service
//!
//! Receives every frame → background message, decodes it and answers
//! requests on their own tasks so that slow handlers never hold up others.

use mdh_bridge::{InboundMessage, PrivilegedEndpoint};
use mdh_types::{
    MessageKind, ProtocolError, RequestEnvelope, RequestId, SenderInfo, TransportMessage,
};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use crate::error::DispatchError;
use crate::ports::RequestHandler;

pub struct BackgroundService {
    handler: Arc<dyn RequestHandler>,
    frames: PrivilegedEndpoint,
}

impl BackgroundService {
    pub fn new(handler: Arc<dyn RequestHandler>, frames: PrivilegedEndpoint) -> Self {
        Self { handler, frames }
    }

    /// Accept one message from `sender`.
    ///
    /// Only `request` messages with a known action are accepted; anything
    /// else is a protocol violation, logged and returned. An accepted
    /// request is answered asynchronously to `sender` alone.
    pub fn handle_message(
        &self,
        sender: SenderInfo,
        message: TransportMessage,
    ) -> Result<RequestId, DispatchError> {
        let envelope = match Self::decode(&message) {
            Ok(envelope) => envelope,
            Err(e) => {
                error!(sender = %sender, name = %message.name, error = %e, "Protocol violation");
                return Err(e.into());
            }
        };

        let request_id = envelope.request_id.clone();
        let handler = self.handler.clone();
        let frames = self.frames.clone();
        tokio::spawn(async move {
            let response = handler.dispatch(sender, envelope).await;
            let request_id = response.request_id.clone();
            match TransportMessage::response(&response) {
                Ok(reply) => {
                    if let Err(e) = frames.send_to(sender, reply) {
                        // The frame went away before its answer was ready
                        warn!(sender = %sender, request_id = %request_id, error = %e, "Response not delivered");
                    }
                }
                Err(e) => error!(request_id = %request_id, error = %e, "Failed to encode response"),
            }
        });
        Ok(request_id)
    }

    fn decode(message: &TransportMessage) -> Result<RequestEnvelope, ProtocolError> {
        match message.kind()? {
            MessageKind::Request => RequestEnvelope::decode(message.message.as_ref()),
            _ => Err(ProtocolError::UnmatchedKind(message.name.clone())),
        }
    }

    /// Drain the inbound queue until it closes or shutdown is signalled.
    pub async fn run(
        &self,
        mut inbound: mpsc::UnboundedReceiver<InboundMessage>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        info!("Background service started");
        loop {
            tokio::select! {
                next = inbound.recv() => {
                    let Some((sender, message)) = next else {
                        debug!("Inbound queue closed");
                        break;
                    };
                    // Violations are already logged; keep serving
                    let _ = self.handle_message(sender, message);
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Background service shutting down");
                        break;
                    }
                }
            }
        }
    }
}
