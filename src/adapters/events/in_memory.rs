//! In-memory event bus.
//!
//! Captures every published event for assertions and fans events out to
//! live subscribers over a tokio broadcast channel. The console driver uses
//! the subscription to echo events; tests use the capture helpers.
//!
//! Methods panic if internal locks are poisoned.

use async_trait::async_trait;
use std::sync::RwLock;
use tokio::sync::broadcast;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

const DEFAULT_CAPACITY: usize = 256;

/// In-memory event bus.
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
/// let mut live = bus.subscribe();
///
/// bus.publish(envelope).await?;
///
/// assert_eq!(bus.event_count(), 1);
/// assert!(bus.has_event("flow.screen_changed.v1"));
/// ```
pub struct InMemoryEventBus {
    published: RwLock<Vec<EventEnvelope>>,
    live: broadcast::Sender<EventEnvelope>,
}

impl InMemoryEventBus {
    /// Creates a new empty event bus.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a bus whose live subscribers may lag by up to `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        let (live, _) = broadcast::channel(capacity.max(1));
        Self {
            published: RwLock::new(Vec::new()),
            live,
        }
    }

    /// Receives every event published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.live.subscribe()
    }

    // === Test Helpers ===

    /// Returns all published events.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .expect("InMemoryEventBus: published lock poisoned")
            .clone()
    }

    /// Returns events of a specific type.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Returns events for a specific aggregate.
    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .collect()
    }

    /// Clears all published events.
    pub fn clear(&self) {
        self.published
            .write()
            .expect("InMemoryEventBus: published write lock poisoned")
            .clear();
    }

    /// Returns count of published events.
    pub fn event_count(&self) -> usize {
        self.published
            .read()
            .expect("InMemoryEventBus: published lock poisoned")
            .len()
    }

    /// Checks if a specific event type was published.
    pub fn has_event(&self, event_type: &str) -> bool {
        self.published
            .read()
            .expect("InMemoryEventBus: published lock poisoned")
            .iter()
            .any(|e| e.event_type == event_type)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.published
            .write()
            .expect("InMemoryEventBus: published write lock poisoned")
            .push(event.clone());

        // No live subscribers is fine; the event is still captured.
        let _ = self.live.send(event);
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(event_type: &str, aggregate_id: &str) -> EventEnvelope {
        EventEnvelope::new(event_type, aggregate_id, "Session", json!({}))
    }

    #[tokio::test]
    async fn captures_published_events() {
        let bus = InMemoryEventBus::new();

        bus.publish(envelope("flow.screen_changed.v1", "s-1")).await.unwrap();
        bus.publish(envelope("flow.session_ended.v1", "s-1")).await.unwrap();

        assert_eq!(bus.event_count(), 2);
        assert!(bus.has_event("flow.session_ended.v1"));
        assert_eq!(bus.events_of_type("flow.screen_changed.v1").len(), 1);
    }

    #[tokio::test]
    async fn filters_by_aggregate() {
        let bus = InMemoryEventBus::new();

        bus.publish_all(vec![
            envelope("flow.screen_changed.v1", "s-1"),
            envelope("flow.screen_changed.v1", "s-2"),
        ])
        .await
        .unwrap();

        assert_eq!(bus.events_for_aggregate("s-2").len(), 1);
    }

    #[tokio::test]
    async fn live_subscribers_receive_events_in_order() {
        let bus = InMemoryEventBus::new();
        let mut live = bus.subscribe();

        bus.publish(envelope("a.v1", "s-1")).await.unwrap();
        bus.publish(envelope("b.v1", "s-1")).await.unwrap();

        assert_eq!(live.recv().await.unwrap().event_type, "a.v1");
        assert_eq!(live.recv().await.unwrap().event_type, "b.v1");
    }

    #[tokio::test]
    async fn publishing_without_subscribers_succeeds() {
        let bus = InMemoryEventBus::new();
        assert!(bus.publish(envelope("a.v1", "s-1")).await.is_ok());
    }

    #[tokio::test]
    async fn clear_removes_captured_events() {
        let bus = InMemoryEventBus::new();
        bus.publish(envelope("a.v1", "s-1")).await.unwrap();

        bus.clear();

        assert_eq!(bus.event_count(), 0);
    }
}
