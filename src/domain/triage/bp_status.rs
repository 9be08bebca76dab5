//! Blood-pressure band.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::vitals::VitalsReading;

/// Band a reading falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BpStatus {
    Normal,
    Elevated,
    High,
    Low,
}

impl BpStatus {
    /// Classifies a reading. Rules are checked in order, first match wins:
    ///
    /// 1. systolic in 90..=120 and diastolic in 60..=80 -> `Normal`
    /// 2. systolic > 140 or diastolic > 90 -> `High`
    /// 3. systolic < 90 or diastolic < 60 -> `Low`
    /// 4. anything else -> `Elevated`
    pub fn from_reading(reading: &VitalsReading) -> Self {
        let systolic = reading.systolic();
        let diastolic = reading.diastolic();

        if (90..=120).contains(&systolic) && (60..=80).contains(&diastolic) {
            BpStatus::Normal
        } else if systolic > 140 || diastolic > 90 {
            BpStatus::High
        } else if systolic < 90 || diastolic < 60 {
            BpStatus::Low
        } else {
            BpStatus::Elevated
        }
    }

    /// High and low readings are the bands that can escalate to an emergency.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, BpStatus::High | BpStatus::Low)
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            BpStatus::Normal => "Normal",
            BpStatus::Elevated => "Elevated",
            BpStatus::High => "High",
            BpStatus::Low => "Low",
        }
    }
}

impl fmt::Display for BpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(systolic: u16, diastolic: u16) -> BpStatus {
        BpStatus::from_reading(&VitalsReading::new(systolic, diastolic).unwrap())
    }

    #[test]
    fn normal_band_is_inclusive() {
        assert_eq!(status(118, 76), BpStatus::Normal);
        assert_eq!(status(90, 60), BpStatus::Normal);
        assert_eq!(status(120, 80), BpStatus::Normal);
    }

    #[test]
    fn high_when_either_pressure_exceeds_limit() {
        assert_eq!(status(150, 95), BpStatus::High);
        assert_eq!(status(141, 70), BpStatus::High);
        assert_eq!(status(130, 91), BpStatus::High);
    }

    #[test]
    fn low_when_either_pressure_below_limit() {
        assert_eq!(status(85, 55), BpStatus::Low);
        assert_eq!(status(89, 70), BpStatus::Low);
        assert_eq!(status(110, 59), BpStatus::Low);
    }

    #[test]
    fn high_takes_precedence_over_low() {
        // Wide pulse pressure: systolic high, diastolic low.
        assert_eq!(status(160, 55), BpStatus::High);
    }

    #[test]
    fn elevated_covers_the_gap() {
        assert_eq!(status(130, 85), BpStatus::Elevated);
        assert_eq!(status(140, 90), BpStatus::Elevated);
        assert_eq!(status(121, 80), BpStatus::Elevated);
        assert_eq!(status(115, 81), BpStatus::Elevated);
    }

    #[test]
    fn out_of_range_only_for_high_and_low() {
        assert!(BpStatus::High.is_out_of_range());
        assert!(BpStatus::Low.is_out_of_range());
        assert!(!BpStatus::Normal.is_out_of_range());
        assert!(!BpStatus::Elevated.is_out_of_range());
    }
}
