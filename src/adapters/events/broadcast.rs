//! Broadcast-only event bus.
//!
//! Forwards events to live subscribers and keeps nothing. Subscribers that
//! fall more than `capacity` events behind skip the oldest ones.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;

pub struct BroadcastEventBus {
    live: broadcast::Sender<EventEnvelope>,
}

impl BroadcastEventBus {
    pub fn new(capacity: usize) -> Self {
        let (live, _) = broadcast::channel(capacity.max(1));
        Self { live }
    }

    /// Receives every event published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.live.subscribe()
    }
}

#[async_trait]
impl EventPublisher for BroadcastEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        // Nobody listening drops the event.
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
