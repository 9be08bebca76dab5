//! VitalsSource port - where blood-pressure readings come from.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::onboarding::DeviceId;
use crate::domain::vitals::VitalsReading;

/// Produces a reading at the end of a measurement window.
#[async_trait]
pub trait VitalsSource: Send + Sync {
    /// Takes one reading.
    ///
    /// `device` is the paired device, if the user connected one.
    ///
    /// # Errors
    ///
    /// - `MeasurementFailed` if no reading could be taken
    async fn read(&self, device: Option<&DeviceId>) -> Result<VitalsReading, DomainError>;
}
