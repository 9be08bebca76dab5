//! Event bus adapters.

mod broadcast;
mod in_memory;

pub use broadcast::BroadcastEventBus;
pub use in_memory::InMemoryEventBus;
