//! Severity tier.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::BpStatus;

/// Symptom count at which an out-of-range reading becomes an emergency.
pub const EMERGENCY_SYMPTOM_THRESHOLD: usize = 2;

/// Three-level triage outcome, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    Normal,
    Urgent,
    Emergency,
}

impl SeverityTier {
    /// Derives the tier:
    ///
    /// - `Emergency` iff the band is high or low and at least two symptoms
    /// - else `Urgent` iff at least one symptom
    /// - else `Normal`
    pub fn assess(bp_status: BpStatus, symptom_count: usize) -> Self {
        if bp_status.is_out_of_range() && symptom_count >= EMERGENCY_SYMPTOM_THRESHOLD {
            SeverityTier::Emergency
        } else if symptom_count >= 1 {
            SeverityTier::Urgent
        } else {
            SeverityTier::Normal
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            SeverityTier::Normal => "Normal",
            SeverityTier::Urgent => "Urgent",
            SeverityTier::Emergency => "Emergency",
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
