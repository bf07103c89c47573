//! Inbound Ports (Driving Ports)

use async_trait::async_trait;
use mdh_types::{RequestEnvelope, ResponseEnvelope, SenderInfo};

/// Answers one decoded request.
///
/// Implementations produce exactly one response per request, even when the
/// payload is empty.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    async fn dispatch(&self, sender: SenderInfo, envelope: RequestEnvelope) -> ResponseEnvelope;
}
