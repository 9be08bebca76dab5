//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, events)
//! - `vitals` - Blood-pressure readings and symptom questionnaire
//! - `triage` - Pure classification of readings and symptoms
//! - `onboarding` - Credential and demographics forms, device catalog
//! - `flow` - Screen state machine and session artifacts

pub mod flow;
pub mod foundation;
pub mod onboarding;
pub mod triage;
pub mod vitals;
