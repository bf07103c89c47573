//! Pending Request Table - correlates responses with waiting callers.
//!
//! Owned by exactly one [`ContextBridge`](crate::ContextBridge) on the
//! requesting side.
//!
//! Flow:
//! 1. The bridge generates a `RequestId` and calls `register()` with a completion
//! 2. The bridge delivers the request over the transport
//! 3. The receive path calls `complete()` when the matching response arrives
//! 4. The entry is removed and its completion runs exactly once
//!
//! Entries without a timeout live until answered.

use crate::error::BridgeError;
use dashmap::DashMap;
use mdh_types::RequestId;
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Outcome handed to a completion.
pub type ResponseResult = Result<Option<Value>, BridgeError>;

/// Boxed callback form of a completion.
pub type ResponseCallback = Box<dyn FnOnce(ResponseResult) + Send + 'static>;

/// How a pending request is resolved.
pub enum Completion {
    /// Invoke a callback.
    Callback(ResponseCallback),
    /// Wake an awaiting `request()` call.
    Channel(oneshot::Sender<ResponseResult>),
}

impl Completion {
    /// Run the completion. Returns false if an awaiting receiver was dropped.
    pub(crate) fn resolve(self, result: ResponseResult) -> bool {
        match self {
            Completion::Callback(callback) => {
                callback(result);
                true
            }
            Completion::Channel(sender) => sender.send(result).is_ok(),
        }
    }
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Completion::Callback(_) => f.write_str("Completion::Callback"),
            Completion::Channel(_) => f.write_str("Completion::Channel"),
        }
    }
}

/// A request waiting for its response
struct PendingRequest {
    /// Entries must be `Sync`, callbacks need not be. Taken out only after
    /// the entry has left the map.
    completion: Mutex<Completion>,
    created_at: Instant,
    /// Action tag (for logging)
    action: &'static str,
    timeout: Option<Duration>,
}

/// Counters for the table
#[derive(Debug, Default)]
pub struct PendingStats {
    pub total_registered: AtomicU64,
    pub total_completed: AtomicU64,
    pub total_timeouts: AtomicU64,
    pub total_cancelled: AtomicU64,
    /// Responses that matched no entry (duplicates or already answered)
    pub total_unmatched: AtomicU64,
}

/// Mapping from request id to completion.
pub struct PendingRequestTable {
    pending: DashMap<RequestId, PendingRequest>,
    stats: Arc<PendingStats>,
}

impl PendingRequestTable {
    pub fn new() -> Self {
        Self {
            pending: DashMap::new(),
            stats: Arc::new(PendingStats::default()),
        }
    }

    /// Register a completion under `request_id`.
    ///
    /// Fails if the id is already outstanding; an id is never reused while
    /// its response is pending.
    pub fn register(
        &self,
        request_id: RequestId,
        action: &'static str,
        completion: Completion,
        timeout: Option<Duration>,
    ) -> Result<(), BridgeError> {
        use dashmap::mapref::entry::Entry;

        match self.pending.entry(request_id.clone()) {
            Entry::Occupied(_) => Err(BridgeError::DuplicateRequestId(request_id)),
            Entry::Vacant(slot) => {
                slot.insert(PendingRequest {
                    completion: Mutex::new(completion),
                    created_at: Instant::now(),
                    action,
                    timeout,
                });
                self.stats.total_registered.fetch_add(1, Ordering::Relaxed);
                debug!(request_id = %request_id, action = action, "Registered pending request");
                Ok(())
            }
        }
    }

    /// Complete a pending request with its response payload.
    ///
    /// Returns false if no entry matched. The completion runs after the
    /// entry has been removed, so it may freely issue new requests.
    pub fn complete(&self, request_id: &RequestId, response: Option<Value>) -> bool {
        let Some((_, pending)) = self.pending.remove(request_id) else {
            self.stats.total_unmatched.fetch_add(1, Ordering::Relaxed);
            debug!(request_id = %request_id, "Response for unknown or already answered request");
            return false;
        };

        let elapsed = pending.created_at.elapsed();
        if pending.completion.into_inner().resolve(Ok(response)) {
            self.stats.total_completed.fetch_add(1, Ordering::Relaxed);
            debug!(
                request_id = %request_id,
                action = pending.action,
                response_time_ms = elapsed.as_millis(),
                "Completed pending request"
            );
        } else {
            // Awaiting caller went away
            self.stats.total_cancelled.fetch_add(1, Ordering::Relaxed);
            debug!(request_id = %request_id, action = pending.action, "Pending request receiver dropped");
        }
        true
    }

    /// Fail a pending request without a response.
    pub fn fail(&self, request_id: &RequestId, error: BridgeError) -> bool {
        match self.pending.remove(request_id) {
            Some((_, pending)) => {
                self.stats.total_cancelled.fetch_add(1, Ordering::Relaxed);
                pending.completion.into_inner().resolve(Err(error));
                true
            }
            None => false,
        }
    }

    /// Drop a pending request without running its completion.
    pub fn cancel(&self, request_id: &RequestId) -> bool {
        if self.pending.remove(request_id).is_some() {
            self.stats.total_cancelled.fetch_add(1, Ordering::Relaxed);
            true
        } else {
            false
        }
    }

    /// Expire entries whose timeout has elapsed.
    ///
    /// Each expired completion receives [`BridgeError::TimedOut`]. Entries
    /// registered without a timeout are never touched. Returns the number of
    /// entries removed.
    pub fn remove_expired(&self) -> usize {
        let now = Instant::now();
        let expired: Vec<RequestId> = self
            .pending
            .iter()
            .filter(|entry| {
                entry
                    .timeout
                    .is_some_and(|timeout| now.duration_since(entry.created_at) > timeout)
            })
            .map(|entry| entry.key().clone())
            .collect();

        let mut removed = 0;
        for request_id in expired {
            let Some((_, pending)) = self.pending.remove(&request_id) else {
                // Answered between the scan and the removal
                continue;
            };
            let timeout = pending.timeout.unwrap_or_default();
            warn!(
                request_id = %request_id,
                action = pending.action,
                elapsed_ms = now.duration_since(pending.created_at).as_millis(),
                timeout_ms = timeout.as_millis(),
                "Removing expired pending request"
            );
            self.stats.total_timeouts.fetch_add(1, Ordering::Relaxed);
            pending.completion.into_inner().resolve(Err(BridgeError::TimedOut {
                request_id,
                timeout_ms: timeout.as_millis(),
            }));
            removed += 1;
        }
        removed
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, request_id: &RequestId) -> bool {
        self.pending.contains_key(request_id)
    }

    pub fn stats(&self) -> &PendingStats {
        &self.stats
    }
}

impl Default for PendingRequestTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Background task that expires stalled requests
pub async fn cleanup_task(table: Arc<PendingRequestTable>, interval: Duration) {
    let mut cleanup_interval = tokio::time::interval(interval);
    cleanup_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        cleanup_interval.tick().await;
        let removed = table.remove_expired();
        if removed > 0 {
            debug!(removed = removed, "Cleaned up expired pending requests");
        }
    }
}
