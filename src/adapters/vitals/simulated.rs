//! Simulated vitals source.
//!
//! Stands in for a paired monitor. Returns a fixed reading unless a script
//! of readings has been queued, in which case those are handed out in order
//! and the fixed reading is used once the script runs out.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::onboarding::DeviceId;
use crate::domain::vitals::VitalsReading;
use crate::ports::VitalsSource;

/// Reading reported when nothing else is scripted.
pub const SIMULATED_SYSTOLIC: u16 = 118;
pub const SIMULATED_DIASTOLIC: u16 = 76;

#[derive(Debug)]
pub struct SimulatedVitalsSource {
    baseline: VitalsReading,
    script: Mutex<VecDeque<Result<VitalsReading, String>>>,
}

impl SimulatedVitalsSource {
    /// Source that always reports 118/76.
    pub fn new() -> Result<Self, DomainError> {
        let baseline = VitalsReading::new(SIMULATED_SYSTOLIC, SIMULATED_DIASTOLIC)?;
        Ok(Self::with_baseline(baseline))
    }

    pub fn with_baseline(baseline: VitalsReading) -> Self {
        Self {
            baseline,
            script: Mutex::new(VecDeque::new()),
        }
    }

    /// Queues a reading for the next measurement.
    pub fn then_reading(self, reading: VitalsReading) -> Self {
        self.script
            .lock()
            .expect("SimulatedVitalsSource: lock poisoned")
            .push_back(Ok(reading));
        self
    }

    /// Queues a failed measurement.
    pub fn then_failure(self, reason: impl Into<String>) -> Self {
        self.script
            .lock()
            .expect("SimulatedVitalsSource: lock poisoned")
            .push_back(Err(reason.into()));
        self
    }
}

#[async_trait]
impl VitalsSource for SimulatedVitalsSource {
    async fn read(&self, device: Option<&DeviceId>) -> Result<VitalsReading, DomainError> {
        let next = self
            .script
            .lock()
            .expect("SimulatedVitalsSource: lock poisoned")
            .pop_front();

        match next {
            None => Ok(self.baseline),
            Some(Ok(reading)) => Ok(reading),
            Some(Err(reason)) => {
                let mut err = DomainError::new(ErrorCode::MeasurementFailed, reason);
                if let Some(device) = device {
                    err = err.with_detail("device", device.to_string());
                }
                Err(err)
            }
        }
    }
}
