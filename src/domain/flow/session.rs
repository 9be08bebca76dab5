//! Per-session artifacts collected along the journey.

use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, Timestamp};
use crate::domain::onboarding::Device;
use crate::domain::triage::{Classification, TriageEngine};
use crate::domain::vitals::{QuestionnaireAnswers, VitalsReading};

/// Reading and answers gathered during one session.
///
/// All start empty and are cleared together when the session ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    device: Option<Device>,
    reading: Option<VitalsReading>,
    answers: Option<QuestionnaireAnswers>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Device picked directly from the catalog, if any.
    pub fn device(&self) -> Option<&Device> {
        self.device.as_ref()
    }

    pub fn pair_device(&mut self, device: Device) {
        self.device = Some(device);
    }

    pub fn reading(&self) -> Option<&VitalsReading> {
        self.reading.as_ref()
    }

    pub fn answers(&self) -> Option<&QuestionnaireAnswers> {
        self.answers.as_ref()
    }

    /// Stores a reading, replacing any earlier one.
    pub fn record_reading(&mut self, reading: VitalsReading) {
        self.reading = Some(reading);
    }

    /// Stores submitted answers, replacing any earlier ones.
    pub fn record_answers(&mut self, answers: QuestionnaireAnswers) {
        self.answers = Some(answers);
    }

    pub fn clear(&mut self) {
        self.device = None;
        self.reading = None;
        self.answers = None;
    }

    /// Classifies the stored artifacts.
    ///
    /// # Errors
    ///
    /// - `ReadingMissing` if no reading has been recorded
    /// - `QuestionnaireIncomplete` propagated from the engine
    pub fn classify(&self) -> Result<Classification, DomainError> {
        let reading = self.reading.as_ref().ok_or_else(|| {
            DomainError::new(
                ErrorCode::ReadingMissing,
                "No vitals reading has been recorded this session",
            )
        })?;
        TriageEngine::classify(reading, self.answers.as_ref())
    }
}

/// Snapshot handed to the results store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResults {
    pub session_id: SessionId,
    pub reading: VitalsReading,
    pub answers: QuestionnaireAnswers,
    pub classification: Classification,
    pub saved_at: Timestamp,
}

impl SavedResults {
    /// Builds a snapshot from a session that has both artifacts.
    ///
    /// # Errors
    ///
    /// - `ReadingMissing` if no reading was recorded
    /// - `QuestionnaireIncomplete` if no answers were submitted
    pub fn capture(session_id: SessionId, state: &SessionState) -> Result<Self, DomainError> {
        let classification = state.classify()?;
        let answers = state.answers.ok_or_else(|| {
            DomainError::new(
                ErrorCode::QuestionnaireIncomplete,
                "No questionnaire has been submitted this session",
            )
        })?;
        let reading = state.reading.ok_or_else(|| {
            DomainError::new(ErrorCode::ReadingMissing, "No vitals reading to save")
        })?;
        Ok(Self {
            session_id,
            reading,
            answers,
            classification,
            saved_at: Timestamp::now(),
        })
    }
}
