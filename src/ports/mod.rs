//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `EventPublisher` - Publishing domain events
//! - `AuthGateway` - Identity provider (password and OAuth sign-in)
//! - `ResultsStore` - Persisting saved results
//! - `VitalsSource` - Taking blood-pressure readings

mod auth_gateway;
mod event_publisher;
mod results_store;
mod vitals_source;

pub use auth_gateway::{AccountCreated, AuthFailure, AuthGateway};
pub use event_publisher::EventPublisher;
pub use results_store::ResultsStore;
pub use vitals_source::VitalsSource;
