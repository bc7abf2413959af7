//! Pending-call tracking for the call engine
//!
//! This module correlates outgoing requests with the responses that arrive
//! for them, in any order.
//!
//! # Call Lifecycle
//!
//! 1. **Generate ID**: a random UUID v4 string, unique among pending calls
//! 2. **Register**: create a oneshot channel for the outcome
//! 3. **Send**: the client hands the encoded request to its sender
//! 4. **Wait**: the caller awaits the oneshot receiver
//! 5. **Complete**: a response with the same id removes the entry and
//!    settles the channel
//!
//! The registry belongs to one client (one logical connection); it is never
//! shared across connections. There are no timeouts: an entry whose response
//! never arrives stays until the client is closed.

use rpcwire_core::{Id, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{oneshot, Mutex};
use uuid::Uuid;

/// Outcome delivered to a waiting caller
pub(crate) type CallOutcome = Result<Value>;

/// Pending call waiting for its response
pub(crate) struct PendingCall {
    tx: oneshot::Sender<CallOutcome>,
}

/// Registry of in-flight calls keyed by request id
#[derive(Clone, Default)]
pub(crate) struct RequestManager {
    pending: Arc<Mutex<HashMap<Id, PendingCall>>>,
}

impl RequestManager {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh request id
    pub(crate) fn next_id(&self) -> Id {
        Id::String(Uuid::new_v4().to_string())
    }

    /// Register a call and return the receiver its outcome will arrive on
    pub(crate) async fn register(&self, id: Id) -> oneshot::Receiver<CallOutcome> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(id, PendingCall { tx });
        rx
    }

    /// Remove the entry for `id` and settle it
    ///
    /// Removal happens before anything else. Returns `false` when no call was
    /// pending under that id.
    pub(crate) async fn complete(&self, id: &Id, outcome: CallOutcome) -> bool {
        let Some(pending) = self.pending.lock().await.remove(id) else {
            return false;
        };
        if pending.tx.send(outcome).is_err() {
            tracing::debug!(id = %id, "Caller stopped waiting before the response arrived");
        }
        true
    }

    /// Drop the entry for `id` without settling it
    pub(crate) async fn evict(&self, id: &Id) {
        self.pending.lock().await.remove(id);
    }

    /// Drop every pending entry; waiting callers observe an abandoned call
    pub(crate) async fn abandon_all(&self) -> usize {
        let mut pending = self.pending.lock().await;
        let count = pending.len();
        pending.clear();
        count
    }

    pub(crate) async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }
}
