//! Blood-pressure reading value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Lowest systolic pressure a device can plausibly report (mmHg).
pub const SYSTOLIC_MIN: u16 = 40;
/// Highest systolic pressure a device can plausibly report (mmHg).
pub const SYSTOLIC_MAX: u16 = 300;
/// Lowest diastolic pressure a device can plausibly report (mmHg).
pub const DIASTOLIC_MIN: u16 = 20;
/// Highest diastolic pressure a device can plausibly report (mmHg).
pub const DIASTOLIC_MAX: u16 = 200;

/// A completed blood-pressure measurement.
///
/// # Invariants
///
/// - `systolic` is within `SYSTOLIC_MIN..=SYSTOLIC_MAX`
/// - `diastolic` is within `DIASTOLIC_MIN..=DIASTOLIC_MAX`
/// - `diastolic < systolic`
///
/// Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct VitalsReading {
    systolic: u16,
    diastolic: u16,
}

impl VitalsReading {
    /// Creates a validated reading.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if either pressure is outside its plausible range
    /// - `InvalidFormat` if diastolic is not below systolic
    pub fn new(systolic: u16, diastolic: u16) -> Result<Self, ValidationError> {
        if !(SYSTOLIC_MIN..=SYSTOLIC_MAX).contains(&systolic) {
            return Err(ValidationError::out_of_range(
                "systolic",
                SYSTOLIC_MIN as i32,
                SYSTOLIC_MAX as i32,
                systolic as i32,
            ));
        }
        if !(DIASTOLIC_MIN..=DIASTOLIC_MAX).contains(&diastolic) {
            return Err(ValidationError::out_of_range(
                "diastolic",
                DIASTOLIC_MIN as i32,
                DIASTOLIC_MAX as i32,
                diastolic as i32,
            ));
        }
        if diastolic >= systolic {
            return Err(ValidationError::invalid_format(
                "diastolic",
                "diastolic pressure must be lower than systolic pressure",
            ));
        }
        Ok(Self {
            systolic,
            diastolic,
        })
    }

    /// Systolic pressure in mmHg.
    pub fn systolic(&self) -> u16 {
        self.systolic
    }

    /// Diastolic pressure in mmHg.
    pub fn diastolic(&self) -> u16 {
        self.diastolic
    }
}

impl fmt::Display for VitalsReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} mmHg", self.systolic, self.diastolic)
    }
}

// Deserialization goes through `new` so the invariants hold for readings
// arriving from collaborators too.
impl<'de> Deserialize<'de> for VitalsReading {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            systolic: u16,
            diastolic: u16,
        }

        let raw = Raw::deserialize(deserializer)?;
        VitalsReading::new(raw.systolic, raw.diastolic).map_err(serde::de::Error::custom)
    }
}
