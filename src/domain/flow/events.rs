//! Session domain events.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{domain_event, EntryId, EventId, SessionId, Timestamp};
use crate::domain::triage::{BpStatus, SeverityTier};
use crate::domain::vitals::VitalsReading;

use super::Screen;

/// The current screen changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenChanged {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub from: Screen,
    pub to: Screen,
    pub entry: EntryId,
    /// Action or identity event name that caused the move.
    pub trigger: String,
    pub changed_at: Timestamp,
}

domain_event!(
    ScreenChanged,
    event_type = "flow.screen_changed.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = changed_at,
    event_id = event_id
);

/// A blood-pressure reading was stored for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecorded {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub reading: VitalsReading,
    pub bp_status: BpStatus,
    pub recorded_at: Timestamp,
}

domain_event!(
    MeasurementRecorded,
    event_type = "flow.measurement_recorded.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = recorded_at,
    event_id = event_id
);

/// A complete questionnaire was submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireSubmitted {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub symptom_count: usize,
    pub submitted_at: Timestamp,
}

domain_event!(
    QuestionnaireSubmitted,
    event_type = "flow.questionnaire_submitted.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = submitted_at,
    event_id = event_id
);

/// The session ended and its artifacts were discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEnded {
    pub event_id: EventId,
    pub session_id: SessionId,
    /// Session that replaces the ended one.
    pub next_session_id: SessionId,
    pub ended_at: Timestamp,
}

domain_event!(
    SessionEnded,
    event_type = "flow.session_ended.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = ended_at,
    event_id = event_id
);

/// A results snapshot was persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsSaved {
    pub event_id: EventId,
    pub session_id: SessionId,
    pub tier: Option<SeverityTier>,
    pub saved_at: Timestamp,
}

domain_event!(
    ResultsSaved,
    event_type = "flow.results_saved.v1",
    schema_version = 1,
    aggregate_id = session_id,
    aggregate_type = "Session",
    occurred_at = saved_at,
    event_id = event_id
);
