//! Triage Module - Pure classification of cardiovascular risk.
//!
//! # Components
//!
//! - `BpStatus` - blood-pressure band derived from a reading alone
//! - `SeverityTier` - normal / urgent / emergency, from band + symptom count
//! - `Guidance` - fixed message selected by tier
//! - `TriageEngine` - combines the above into a `Classification`
//!
//! Everything here is stateless. A classification is recomputed from the
//! reading and answers every time it is needed and never stored on its own.

mod bp_status;
mod engine;
mod guidance;
mod severity;

pub use bp_status::BpStatus;
pub use engine::{Classification, SeverityAssessment, TriageEngine};
pub use guidance::{Guidance, MEDICAL_DISCLAIMER};
pub use severity::{SeverityTier, EMERGENCY_SYMPTOM_THRESHOLD};
