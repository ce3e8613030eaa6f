//! Session Event System
//!
//! Events are how the relay crosses back into the caller's world: instead of
//! re-entering the UI thread directly, the relay publishes to a broadcast
//! bus and the UI layer marshals events onto its own event loop. Per-line
//! order is preserved for each subscriber.
//!
//! Ordering contract for one run: `Started`, then every `Line` in receive
//! order (the exit-code line last), then `Ended`, then at most one
//! `CleanupFailed`. No `Line` event follows `Ended`.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use crate::models::{OutputLine, RunResult};

/// Events emitted over the lifetime of a script session
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The interpreter process has been spawned; no line precedes this
    Started {
        /// The session identifier
        session_id: String,
        /// Process ID of the interpreter
        pid: Option<u32>,
    },
    /// One line of merged interpreter output, in receive order
    Line {
        /// The session identifier
        session_id: String,
        /// The classified output line
        line: OutputLine,
    },
    /// The run terminated; the exit-code line has already been delivered
    Ended {
        /// The session identifier
        session_id: String,
        /// Terminal run summary
        result: RunResult,
    },
    /// Deleting the script artifact failed after the run
    CleanupFailed {
        /// The session identifier
        session_id: String,
        /// Path of the artifact that could not be deleted
        path: PathBuf,
        /// Why deletion failed
        reason: String,
    },
}

impl SessionEvent {
    /// The session this event belongs to
    pub fn session_id(&self) -> &str {
        match self {
            SessionEvent::Started { session_id, .. }
            | SessionEvent::Line { session_id, .. }
            | SessionEvent::Ended { session_id, .. }
            | SessionEvent::CleanupFailed { session_id, .. } => session_id,
        }
    }
}

/// Subscription handle for receiving session events
pub struct SessionEventSubscription {
    receiver: broadcast::Receiver<SessionEvent>,
}

impl SessionEventSubscription {
    /// Receive the next event, waiting if necessary.
    ///
    /// Returns `None` once the bus is closed and drained.
    pub async fn recv(&mut self) -> Option<SessionEvent> {
        match self.receiver.recv().await {
            Ok(event) => Some(event),
            Err(broadcast::error::RecvError::Closed) => None,
            Err(broadcast::error::RecvError::Lagged(count)) => {
                tracing::warn!("Session event subscriber lagged by {} events", count);
                self.receiver.recv().await.ok()
            }
        }
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&mut self) -> Option<SessionEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(broadcast::error::TryRecvError::Empty) => None,
            Err(broadcast::error::TryRecvError::Closed) => None,
            Err(broadcast::error::TryRecvError::Lagged(count)) => {
                tracing::warn!("Session event subscriber lagged by {} events", count);
                self.try_recv()
            }
        }
    }
}

/// Broadcast bus for publishing and subscribing to session events
#[derive(Clone)]
pub struct SessionEventBus {
    sender: broadcast::Sender<SessionEvent>,
    /// Active subscribers count (for monitoring)
    active_subscribers: Arc<RwLock<usize>>,
}

impl SessionEventBus {
    /// Create a new event bus with the specified buffering capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            active_subscribers: Arc::new(RwLock::new(0)),
        }
    }

    /// Subscribe to session events
    pub async fn subscribe(&self) -> SessionEventSubscription {
        let receiver = self.sender.subscribe();
        let mut count = self.active_subscribers.write().await;
        *count += 1;
        SessionEventSubscription { receiver }
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: SessionEvent) {
        // Ignore errors - they just mean no subscribers are active
        let _ = self.sender.send(event);
    }

    /// Number of subscriptions handed out
    pub async fn subscriber_count(&self) -> usize {
        *self.active_subscribers.read().await
    }
}

impl Default for SessionEventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
