//! Context Bridge - request/response RPC over a fire-and-forget transport.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       CONTEXT BRIDGE                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │  send() / request()                 route(inbound)            │
//! │        │                                  │                   │
//! │  ┌─────┴──────────────────────────────────┴────────┐          │
//! │  │          Pending Request Table (DashMap)         │          │
//! │  │   requestID → Completion (callback | oneshot)    │          │
//! │  └─────┬────────────────────────────────────────────┘          │
//! │        │ deliver()                                            │
//! │  ┌─────┴──────────────┐     ┌──────────────────────┐          │
//! │  │  Transport (trait) │ ◀── │ ChannelHub (tokio)   │          │
//! │  └────────────────────┘     └──────────────────────┘          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Guarantees
//!
//! - A completion runs at most once, with the response to its own request.
//! - Responses may arrive in any order.
//! - A response with an unknown `requestID` is dropped without effect.
//! - Without a configured timeout, entries live until answered.

pub mod bridge;
pub mod channel;
pub mod config;
pub mod error;
pub mod pending;
pub mod transport;

pub use bridge::{ContextBridge, Routed};
pub use channel::{ChannelHub, FrameEndpoint, FrameLink, InboundMessage, PrivilegedEndpoint};
pub use config::{BridgeConfig, DEFAULT_CLEANUP_INTERVAL};
pub use error::{BridgeError, TransportError};
pub use pending::{
    cleanup_task, Completion, PendingRequestTable, PendingStats, ResponseCallback, ResponseResult,
};
pub use transport::Transport;
