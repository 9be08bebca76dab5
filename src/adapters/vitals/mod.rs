//! Vitals source adapters.

mod simulated;

pub use simulated::{SimulatedVitalsSource, SIMULATED_DIASTOLIC, SIMULATED_SYSTOLIC};
