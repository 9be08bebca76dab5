//! Identity provider adapters.

mod mock;

pub use mock::MockAuthGateway;
