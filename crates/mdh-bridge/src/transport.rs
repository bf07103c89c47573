//! Transport port.
//!
//! The raw message primitive between two contexts: asynchronous,
//! order-preserving per channel, no request/response pairing and no delivery
//! guarantee beyond "delivered if both ends still exist".

use crate::error::TransportError;
use mdh_types::TransportMessage;

/// Outbound half of a transport link.
///
/// `deliver` must not block; the message is queued for the peer and the call
/// returns immediately.
pub trait Transport: Send + Sync {
    fn deliver(&self, message: TransportMessage) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn deliver(&self, message: TransportMessage) -> Result<(), TransportError> {
        (**self).deliver(message)
    }
}
