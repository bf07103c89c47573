//! In-process channel transport.
//!
//! One privileged endpoint, many frame endpoints. Each frame link is a pair of
//! unbounded tokio channels; the privileged side sees a single inbound queue
//! of `(SenderInfo, TransportMessage)` so every message carries its origin.

use crate::error::TransportError;
use crate::transport::Transport;
use dashmap::DashMap;
use mdh_types::{SenderInfo, TabId, TransportMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Message as seen by the privileged side.
pub type InboundMessage = (SenderInfo, TransportMessage);

type FrameRoutes = Arc<DashMap<SenderInfo, mpsc::UnboundedSender<TransportMessage>>>;

/// Registry of connected frames.
pub struct ChannelHub {
    frames: FrameRoutes,
    inbound_tx: mpsc::UnboundedSender<InboundMessage>,
}

impl ChannelHub {
    /// Create a hub and the privileged side's inbound queue.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<InboundMessage>) {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        (
            Self {
                frames: Arc::new(DashMap::new()),
                inbound_tx,
            },
            inbound_rx,
        )
    }

    /// Connect a frame. Reconnecting the same sender replaces the old link.
    pub fn connect(&self, origin: SenderInfo) -> FrameLink {
        let (frame_tx, frame_rx) = mpsc::unbounded_channel();
        if self.frames.insert(origin, frame_tx).is_some() {
            debug!(sender = %origin, "Replaced existing frame link");
        } else {
            debug!(sender = %origin, "Frame connected");
        }
        FrameLink {
            endpoint: FrameEndpoint {
                origin,
                outbound: self.inbound_tx.clone(),
            },
            inbound: frame_rx,
        }
    }

    /// Forget a frame; later sends to it fail with `UnknownDestination`.
    pub fn disconnect(&self, origin: &SenderInfo) -> bool {
        let removed = self.frames.remove(origin).is_some();
        if removed {
            debug!(sender = %origin, "Frame disconnected");
        }
        removed
    }

    /// Sending half for the privileged side.
    pub fn endpoint(&self) -> PrivilegedEndpoint {
        PrivilegedEndpoint {
            frames: self.frames.clone(),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

/// What a connecting frame receives.
pub struct FrameLink {
    /// Outbound transport, tagged with the frame's origin.
    pub endpoint: FrameEndpoint,
    /// Messages from the privileged side.
    pub inbound: mpsc::UnboundedReceiver<TransportMessage>,
}

/// Frame → privileged transport.
#[derive(Clone)]
pub struct FrameEndpoint {
    origin: SenderInfo,
    outbound: mpsc::UnboundedSender<InboundMessage>,
}

impl FrameEndpoint {
    pub fn origin(&self) -> SenderInfo {
        self.origin
    }
}

impl Transport for FrameEndpoint {
    fn deliver(&self, message: TransportMessage) -> Result<(), TransportError> {
        self.outbound
            .send((self.origin, message))
            .map_err(|_| TransportError::Disconnected)
    }
}

/// Privileged → frame sender.
#[derive(Clone)]
pub struct PrivilegedEndpoint {
    frames: FrameRoutes,
}

impl PrivilegedEndpoint {
    /// Send to one frame.
    pub fn send_to(&self, target: SenderInfo, message: TransportMessage) -> Result<(), TransportError> {
        // Clone the sender so no map guard is held while sending
        let route = self
            .frames
            .get(&target)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| TransportError::UnknownDestination(target.to_string()))?;
        route.send(message).map_err(|_| {
            self.frames.remove(&target);
            TransportError::Disconnected
        })
    }

    /// Send to every frame of a tab. Returns how many frames were reached.
    pub fn send_to_tab(&self, tab: TabId, message: &TransportMessage) -> usize {
        self.frames_of(tab)
            .into_iter()
            .filter(|frame| self.send_to(*frame, message.clone()).is_ok())
            .count()
    }

    /// Connected frames of a tab, top frame first.
    pub fn frames_of(&self, tab: TabId) -> Vec<SenderInfo> {
        let mut frames: Vec<SenderInfo> = self
            .frames
            .iter()
            .map(|entry| *entry.key())
            .filter(|sender| sender.tab == tab)
            .collect();
        frames.sort_by_key(|sender| sender.frame);
        frames
    }
}
