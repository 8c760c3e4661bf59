//! BroadcastHub: realtime event fan-out
//!
//! Owns the write half of every connected WebSocket client:
//!
//! ```text
//! Order / subscription mutation
//!       │ BroadcastEvent
//!       ▼
//! BroadcastHub (registry: client_id → mpsc::Sender<String>)
//!       │ try_send, one serialized frame shared by all clients
//!       ▼
//! per-client writer task (api::ws)
//! ```
//!
//! Delivery is best-effort, at-most-once: no buffering beyond the
//! per-client channel, no replay for late registrants. A client whose
//! channel is full or closed is dropped from the registry; nobody else
//! is affected and `publish` never blocks or fails.

use dashmap::DashMap;
use shared::BroadcastEvent;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

/// Per-client channel capacity: enough to absorb a burst while the
/// writer task drains frames onto the socket.
const CLIENT_CHANNEL_CAPACITY: usize = 32;

/// Registry of live WebSocket clients.
///
/// The registry is owned exclusively by the hub; connection handlers
/// interact with it only through [`register`](Self::register) /
/// [`deregister`](Self::deregister). There is no per-tenant scoping at
/// this boundary: every client sees every event.
#[derive(Clone, Default)]
pub struct BroadcastHub {
    clients: Arc<DashMap<u64, mpsc::Sender<String>>>,
    next_id: Arc<AtomicU64>,
}

impl BroadcastHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new client and hand back its frame receiver.
    ///
    /// Events published before this call are not replayed.
    pub fn register(&self) -> (u64, mpsc::Receiver<String>) {
        let client_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::channel(CLIENT_CHANNEL_CAPACITY);
        self.clients.insert(client_id, tx);
        tracing::debug!(client_id, "Live client registered");
        (client_id, rx)
    }

    /// Remove a client from the registry (normal disconnect path)
    pub fn deregister(&self, client_id: u64) {
        if self.clients.remove(&client_id).is_some() {
            tracing::debug!(client_id, "Live client deregistered");
        }
    }

    /// Fan an event out to every registered client.
    ///
    /// The event is serialized once; each client gets the same frame via
    /// `try_send`. A full or closed channel drops that client from the
    /// registry; the loop never waits on a slow consumer.
    pub fn publish(&self, event: &BroadcastEvent) {
        let frame = match serde_json::to_string(event) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(error = %e, event = %event, "Failed to serialize broadcast event");
                return;
            }
        };

        // Collect losers first: removing while iterating the same shard
        // would deadlock the DashMap.
        let mut dropped = Vec::new();
        for entry in self.clients.iter() {
            if entry.value().try_send(frame.clone()).is_err() {
                dropped.push(*entry.key());
            }
        }

        for client_id in dropped {
            self.clients.remove(&client_id);
            tracing::warn!(client_id, event = %event, "Dropped unresponsive live client");
        }
    }

    /// Number of currently registered clients
    pub fn client_count(&self) -> usize {
        self.clients.len()
    }
}
