//! Adapters - Implementations of port interfaces.
//!
//! - `events` - In-memory event bus with live subscriptions
//! - `auth` - Mock identity provider
//! - `results` - In-memory results store
//! - `vitals` - Simulated blood-pressure monitor
//! - `console` - Line parser for the console driver

pub mod auth;
pub mod console;
pub mod events;
pub mod results;
pub mod vitals;

pub use auth::MockAuthGateway;
pub use console::{ConsoleCommand, ParseError};
pub use events::{BroadcastEventBus, InMemoryEventBus};
pub use results::InMemoryResultsStore;
pub use vitals::SimulatedVitalsSource;
