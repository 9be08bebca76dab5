//! Screen flow domain.
//!
//! - `Screen` - the fourteen journey steps
//! - `Action` - user intents and timer outcomes
//! - `resolve` - the transition table
//! - `FlowController` - current screen, entry and session artifacts
//! - `TimerTicket` - entry-scoped timer bookkeeping
//! - events published on every change

mod action;
mod controller;
pub mod events;
mod identity;
mod screen;
mod session;
mod timer;
mod transition;

pub use action::Action;
pub use controller::{FlowController, FlowSnapshot, Outcome, Transition, Trigger};
pub use identity::{AuthProvider, IdentityEvent};
pub use screen::Screen;
pub use session::{SavedResults, SessionState};
pub use timer::{TimerKind, TimerSettings, TimerTicket};
pub use transition::{requires_confirmation, resolve, Route};
