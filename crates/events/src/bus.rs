//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] fans [`SchemaEvent`]s out to every subscriber. It is cheap to
//! clone; all clones publish into the same channel.

use std::sync::Arc;

use tf2schema_core::{RawSchema, SchemaError};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// SchemaEvent
// ---------------------------------------------------------------------------

/// A schema lifecycle notification.
#[derive(Debug, Clone)]
pub enum SchemaEvent {
    /// The manager finished initializing. Published exactly once.
    Ready,

    /// A freshly fetched snapshot replaced the current one.
    SchemaUpdated(Arc<RawSchema>),

    /// A scheduled refresh failed; the previous snapshot stays in use.
    RefreshFailed(SchemaError),
}

impl SchemaEvent {
    /// Short name for logging, e.g. `"schema.updated"`.
    pub fn kind(&self) -> &'static str {
        match self {
            SchemaEvent::Ready => "schema.ready",
            SchemaEvent::SchemaUpdated(_) => "schema.updated",
            SchemaEvent::RefreshFailed(_) => "schema.refresh_failed",
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 64;

/// In-process fan-out event bus.
///
/// # Usage
///
/// ```rust
/// use tf2schema_events::{EventBus, SchemaEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(SchemaEvent::Ready);
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<SchemaEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// If there are no active subscribers the event is silently dropped.
    pub fn publish(&self, event: SchemaEvent) {
        tracing::debug!(kind = event.kind(), "Publishing schema event");
        // Ignore the SendError; it only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<SchemaEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
