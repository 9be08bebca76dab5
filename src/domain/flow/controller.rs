//! Flow controller - owns the current screen and the session artifacts.
//!
//! The controller is synchronous and deterministic. It never sleeps or
//! performs I/O; timers and persistence are driven by the runtime, which
//! feeds results back in through `fire_timer` and `advance`.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::foundation::{
    DomainError, EntryId, EventEnvelope, EventId, SerializableDomainEvent, SessionId, StateMachine,
    Timestamp,
};
use crate::domain::triage::{BpStatus, Classification};
use crate::domain::vitals::{QuestionnaireAnswers, VitalsReading};

use super::events::{MeasurementRecorded, QuestionnaireSubmitted, ScreenChanged, SessionEnded};
use super::transition::{requires_confirmation, resolve, Route};
use super::{
    Action, IdentityEvent, SavedResults, Screen, SessionState, TimerKind, TimerSettings,
    TimerTicket,
};

/// What caused a screen change.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    Action(Action),
    Identity(IdentityEvent),
}

impl Trigger {
    pub fn name(&self) -> &'static str {
        match self {
            Trigger::Action(action) => action.name(),
            Trigger::Identity(event) => event.name(),
        }
    }
}

/// A completed screen change.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Session the change happened in.
    pub session_id: SessionId,
    pub from: Screen,
    pub to: Screen,
    /// Entry of `to` created by this change.
    pub entry: EntryId,
    pub trigger: Trigger,
    /// Set when the change ended the session and started a new one.
    pub started_session: Option<SessionId>,
}

impl Transition {
    /// Domain events describing this change, in the order they happened.
    pub fn events(&self) -> Vec<EventEnvelope> {
        let now = Timestamp::now();
        let mut events = Vec::with_capacity(2);

        match &self.trigger {
            Trigger::Action(Action::MeasurementComplete(reading)) => {
                events.push(
                    MeasurementRecorded {
                        event_id: EventId::new(),
                        session_id: self.session_id,
                        reading: *reading,
                        bp_status: BpStatus::from_reading(reading),
                        recorded_at: now,
                    }
                    .to_envelope(),
                );
            }
            Trigger::Action(Action::Submit(answers)) => {
                events.push(
                    QuestionnaireSubmitted {
                        event_id: EventId::new(),
                        session_id: self.session_id,
                        symptom_count: answers.symptom_count(),
                        submitted_at: now,
                    }
                    .to_envelope(),
                );
            }
            _ => {}
        }

        events.push(
            ScreenChanged {
                event_id: EventId::new(),
                session_id: self.session_id,
                from: self.from,
                to: self.to,
                entry: self.entry,
                trigger: self.trigger.name().to_string(),
                changed_at: now,
            }
            .to_envelope(),
        );

        if let Some(next_session_id) = self.started_session {
            events.push(
                SessionEnded {
                    event_id: EventId::new(),
                    session_id: self.session_id,
                    next_session_id,
                    ended_at: now,
                }
                .to_envelope(),
            );
        }

        // events from one change share the entry as correlation id
        let correlation = self.entry.to_string();
        events
            .into_iter()
            .map(|envelope| envelope.with_correlation_id(correlation.clone()))
            .collect()
    }
}

/// Result of presenting an input to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Not legal on the current screen; nothing changed.
    Ignored,
    /// The screen changed.
    Moved(Transition),
    /// Results should be persisted; the screen did not change.
    SaveRequested(SavedResults),
}

impl Outcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Outcome::Ignored)
    }

    /// Screen reached, if the outcome was a move.
    pub fn destination(&self) -> Option<Screen> {
        match self {
            Outcome::Moved(transition) => Some(transition.to),
            _ => None,
        }
    }
}

/// Read-only view of the controller for presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowSnapshot {
    pub session_id: SessionId,
    pub screen: Screen,
    pub entry: EntryId,
    pub completion_percent: u8,
    pub reading: Option<VitalsReading>,
    pub answers: Option<QuestionnaireAnswers>,
}

/// State machine over the onboarding journey.
#[derive(Debug, Clone)]
pub struct FlowController {
    session_id: SessionId,
    screen: Screen,
    entry: EntryId,
    session: SessionState,
}

impl FlowController {
    /// Starts a new journey on the loading screen.
    pub fn new() -> Self {
        Self {
            session_id: SessionId::new(),
            screen: Screen::Loading,
            entry: EntryId::FIRST,
            session: SessionState::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Identifies the current visit to the current screen.
    pub fn entry(&self) -> EntryId {
        self.entry
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot {
            session_id: self.session_id,
            screen: self.screen,
            entry: self.entry,
            completion_percent: self.screen.completion_percent(),
            reading: self.session.reading().copied(),
            answers: self.session.answers().copied(),
        }
    }

    /// Classifies the current session's artifacts.
    ///
    /// # Errors
    ///
    /// - `ReadingMissing` if no reading has been recorded
    pub fn classify(&self) -> Result<Classification, DomainError> {
        self.session.classify()
    }

    /// Applies an action entered directly by the user.
    ///
    /// Edges that stand for a confirmed form submission are refused; see
    /// `requires_confirmation` and `advance_from`.
    pub fn act(&mut self, action: Action) -> Outcome {
        if requires_confirmation(self.screen, &action) {
            debug!(screen = %self.screen, action = action.name(), "Action needs a confirmed submission");
            return Outcome::Ignored;
        }
        self.advance(action)
    }

    /// Applies `action` only while `expected` is still showing.
    ///
    /// Used once a form submission has been confirmed, so the confirmation
    /// can never land on a screen the user moved to in the meantime.
    pub fn advance_from(&mut self, expected: Screen, action: Action) -> Outcome {
        if self.screen != expected {
            debug!(
                expected = %expected,
                screen = %self.screen,
                action = action.name(),
                "Screen changed before confirmation arrived"
            );
            return Outcome::Ignored;
        }
        self.advance(action)
    }

    /// Applies any action in the transition table, including confirmed
    /// form edges. Timers and `advance_from` come through here.
    pub fn advance(&mut self, action: Action) -> Outcome {
        let Some(route) = resolve(self.screen, &action) else {
            debug!(screen = %self.screen, action = action.name(), "Action ignored");
            return Outcome::Ignored;
        };

        match route {
            Route::Stay => self.stay(&action),
            Route::Move(to) => {
                debug_assert!(
                    self.screen.can_transition_to(&to),
                    "{} -> {} missing from valid_transitions",
                    self.screen,
                    to
                );
                let mut started_session = None;
                match &action {
                    Action::Connect(device) => self.session.pair_device(device.clone()),
                    Action::MeasurementComplete(reading) => self.session.record_reading(*reading),
                    Action::Submit(answers) => self.session.record_answers(*answers),
                    Action::EndSession => {
                        self.session.clear();
                        started_session = Some(SessionId::new());
                    }
                    _ => {}
                }
                let transition = self.enter(to, Trigger::Action(action));
                if let Some(next) = started_session {
                    self.session_id = next;
                }
                Outcome::Moved(Transition {
                    started_session,
                    ..transition
                })
            }
        }
    }

    /// Applies an identity provider notification.
    ///
    /// Password recovery wins from any screen. A sign-in is only honoured
    /// while an authentication screen is showing.
    pub fn receive_identity_event(&mut self, event: IdentityEvent) -> Outcome {
        let target = match event {
            IdentityEvent::PasswordRecoveryRequested if self.screen != Screen::ResetPassword => {
                Some(Screen::ResetPassword)
            }
            IdentityEvent::SignedIn { is_new_account, .. } if self.screen.awaits_authentication() => {
                Some(if is_new_account {
                    Screen::Demographics
                } else {
                    Screen::DeviceConnection
                })
            }
            _ => None,
        };

        match target {
            Some(to) => Outcome::Moved(self.enter(to, Trigger::Identity(event))),
            None => {
                debug!(screen = %self.screen, event = event.name(), "Identity event ignored");
                Outcome::Ignored
            }
        }
    }

    /// Ticket for the timer the current screen entry should run, if any.
    pub fn armed_timer(&self, settings: &TimerSettings) -> Option<TimerTicket> {
        let kind = TimerKind::for_screen(self.screen)?;
        let delay = settings.delay(kind)?;
        Some(TimerTicket {
            entry: self.entry,
            screen: self.screen,
            kind,
            delay,
        })
    }

    /// True while `ticket` still belongs to the current screen entry.
    pub fn is_current(&self, ticket: &TimerTicket) -> bool {
        ticket.entry == self.entry && ticket.screen == self.screen
    }

    /// Delivers a fired timer together with the action it produced.
    ///
    /// Stale tickets, and actions that do not belong to the ticket's kind,
    /// are ignored.
    pub fn fire_timer(&mut self, ticket: &TimerTicket, action: Action) -> Outcome {
        if !self.is_current(ticket) {
            debug!(
                timer = ticket.kind.name(),
                ticket_entry = %ticket.entry,
                current_entry = %self.entry,
                "Stale timer ignored"
            );
            return Outcome::Ignored;
        }

        let matches_kind = match ticket.kind {
            TimerKind::Measurement => matches!(action, Action::MeasurementComplete(_)),
            kind => kind.action().as_ref() == Some(&action),
        };
        if !matches_kind {
            warn!(timer = ticket.kind.name(), action = action.name(), "Timer produced unexpected action");
            return Outcome::Ignored;
        }

        self.advance(action)
    }

    fn stay(&mut self, action: &Action) -> Outcome {
        match SavedResults::capture(self.session_id, &self.session) {
            Ok(results) => {
                info!(session_id = %self.session_id, action = action.name(), "Results save requested");
                Outcome::SaveRequested(results)
            }
            Err(e) => {
                warn!(session_id = %self.session_id, error = %e, "Nothing to save");
                Outcome::Ignored
            }
        }
    }

    fn enter(&mut self, to: Screen, trigger: Trigger) -> Transition {
        let from = self.screen;
        let session_id = self.session_id;

        self.screen = to;
        self.entry = self.entry.next();

        info!(
            session_id = %session_id,
            from = %from,
            to = %to,
            entry = %self.entry,
            trigger = trigger.name(),
            "Screen changed"
        );

        Transition {
            session_id,
            from,
            to,
            entry: self.entry,
            trigger,
            started_session: None,
        }
    }
}

impl Default for FlowController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::onboarding::Device;
    use crate::domain::triage::SeverityTier;
    use crate::domain::vitals::{Answer, Symptom};
    use crate::domain::flow::AuthProvider;

    fn reading(systolic: u16, diastolic: u16) -> VitalsReading {
        VitalsReading::new(systolic, diastolic).unwrap()
    }

    fn drive(controller: &mut FlowController, actions: Vec<Action>) {
        for action in actions {
            let name = action.name();
            assert!(
                !controller.advance(action).is_ignored(),
                "{name} ignored on {}",
                controller.screen()
            );
        }
    }

    fn at_questionnaire() -> FlowController {
        let mut controller = FlowController::new();
        drive(
            &mut controller,
            vec![
                Action::TimerExpired,
                Action::Login,
                Action::Continue,
                Action::Connect(Device::find("health-monitor-pro").unwrap()),
                Action::MeasurementComplete(reading(150, 95)),
                Action::Continue,
            ],
        );
        assert_eq!(controller.screen(), Screen::Questionnaire);
        controller
    }

    #[test]
    fn starts_on_loading_with_empty_session() {
        let controller = FlowController::new();
        assert_eq!(controller.screen(), Screen::Loading);
        assert_eq!(controller.entry(), EntryId::FIRST);
        assert!(controller.session().reading().is_none());
        assert!(controller.session().answers().is_none());
    }

    #[test]
    fn illegal_action_changes_nothing() {
        let mut controller = FlowController::new();
        let before = controller.snapshot();

        assert_eq!(controller.advance(Action::Continue), Outcome::Ignored);
        assert_eq!(controller.snapshot(), before);
    }

    #[test]
    fn bare_continue_on_form_screens_is_refused() {
        let mut controller = FlowController::new();
        controller.act(Action::TimerExpired);
        controller.act(Action::ContinueWithEmail);

        assert_eq!(controller.act(Action::Continue), Outcome::Ignored);
        assert_eq!(controller.screen(), Screen::Signup);

        controller.act(Action::GotoLogin);
        assert_eq!(controller.act(Action::Continue), Outcome::Ignored);
        assert_eq!(controller.screen(), Screen::Login);
    }

    #[test]
    fn act_still_takes_ordinary_edges() {
        let mut controller = at_questionnaire();
        controller.act(Action::Back);
        assert_eq!(controller.screen(), Screen::VitalResults);

        let outcome = controller.act(Action::Continue);
        assert_eq!(outcome.destination(), Some(Screen::Questionnaire));
    }

    #[test]
    fn confirmed_continue_applies_on_expected_screen() {
        let mut controller = FlowController::new();
        controller.act(Action::TimerExpired);
        controller.act(Action::ContinueWithEmail);

        let outcome = controller.advance_from(Screen::Signup, Action::Continue);
        assert_eq!(outcome.destination(), Some(Screen::Demographics));
    }

    #[test]
    fn confirmation_for_a_screen_already_left_is_dropped() {
        let mut controller = FlowController::new();
        controller.act(Action::TimerExpired);
        controller.act(Action::ContinueWithEmail);
        controller.act(Action::GotoLogin);
        let before = controller.snapshot();

        let outcome = controller.advance_from(Screen::Signup, Action::Continue);

        assert_eq!(outcome, Outcome::Ignored);
        assert_eq!(controller.snapshot(), before);
    }

    #[test]
    fn every_move_bumps_the_entry() {
        let mut controller = FlowController::new();
        controller.advance(Action::TimerExpired);
        let first = controller.entry();
        controller.advance(Action::ContinueWithEmail);
        controller.advance(Action::Back);

        assert_eq!(controller.screen(), Screen::Landing);
        assert!(controller.entry() > first);
    }

    #[test]
    fn measurement_records_reading() {
        let controller = at_questionnaire();
        assert_eq!(controller.session().reading(), Some(&reading(150, 95)));
        assert_eq!(
            controller.session().device().map(|d| d.id.as_str()),
            Some("health-monitor-pro")
        );
    }

    #[test]
    fn incomplete_submit_is_ignored() {
        let mut controller = at_questionnaire();
        let partial = QuestionnaireAnswers::new().with(Symptom::Dizzy, true);

        assert!(controller.advance(Action::Submit(partial)).is_ignored());
        assert_eq!(controller.screen(), Screen::Questionnaire);
        assert!(controller.session().answers().is_none());
    }

    #[test]
    fn full_journey_classifies_emergency() {
        let mut controller = at_questionnaire();
        let answers = QuestionnaireAnswers::uniform(Answer::No)
            .with(Symptom::Dizzy, true)
            .with(Symptom::Headaches, true);

        let outcome = controller.advance(Action::Submit(answers));

        assert_eq!(outcome.destination(), Some(Screen::FinalResults));
        let classification = controller.classify().unwrap();
        assert_eq!(classification.bp_status, BpStatus::High);
        assert_eq!(classification.tier(), Some(SeverityTier::Emergency));
    }

    #[test]
    fn remeasuring_replaces_reading() {
        let mut controller = at_questionnaire();
        drive(
            &mut controller,
            vec![
                Action::Back,
                Action::Back,
                Action::MeasurementComplete(reading(118, 76)),
            ],
        );

        assert_eq!(controller.session().reading(), Some(&reading(118, 76)));
    }

    #[test]
    fn save_results_stays_and_captures_snapshot() {
        let mut controller = at_questionnaire();
        controller.advance(Action::Submit(QuestionnaireAnswers::uniform(Answer::No)));

        let outcome = controller.advance(Action::SaveResults);

        let Outcome::SaveRequested(saved) = outcome else {
            panic!("expected save request, got {outcome:?}");
        };
        assert_eq!(saved.session_id, controller.session_id());
        assert_eq!(saved.reading, reading(150, 95));
        assert_eq!(controller.screen(), Screen::FinalResults);
    }

    #[test]
    fn end_session_clears_artifacts_and_starts_new_session() {
        let mut controller = at_questionnaire();
        controller.advance(Action::Submit(QuestionnaireAnswers::uniform(Answer::No)));
        let old_session = controller.session_id();

        let outcome = controller.advance(Action::EndSession);

        let Outcome::Moved(transition) = outcome else {
            panic!("expected move");
        };
        assert_eq!(transition.to, Screen::Landing);
        assert_eq!(transition.session_id, old_session);
        assert_eq!(transition.started_session, Some(controller.session_id()));
        assert_ne!(controller.session_id(), old_session);
        assert!(controller.session().reading().is_none());
        assert!(controller.session().answers().is_none());
        assert_eq!(controller.classify().unwrap_err().code, ErrorCode::ReadingMissing);
    }

    #[test]
    fn password_recovery_preempts_any_screen() {
        for start in [Screen::Loading, Screen::Questionnaire, Screen::Landing] {
            let mut controller = FlowController::new();
            controller.screen = start;

            let outcome = controller.receive_identity_event(IdentityEvent::PasswordRecoveryRequested);

            assert_eq!(outcome.destination(), Some(Screen::ResetPassword));
        }
    }

    #[test]
    fn password_recovery_on_reset_screen_is_ignored() {
        let mut controller = FlowController::new();
        controller.receive_identity_event(IdentityEvent::PasswordRecoveryRequested);
        let entry = controller.entry();

        let outcome = controller.receive_identity_event(IdentityEvent::PasswordRecoveryRequested);

        assert!(outcome.is_ignored());
        assert_eq!(controller.entry(), entry);
    }

    #[test]
    fn sign_in_routes_by_account_age() {
        let mut fresh = FlowController::new();
        fresh.advance(Action::TimerExpired);
        let outcome = fresh.receive_identity_event(IdentityEvent::SignedIn {
            provider: AuthProvider::Google,
            is_new_account: true,
        });
        assert_eq!(outcome.destination(), Some(Screen::Demographics));

        let mut returning = FlowController::new();
        returning.advance(Action::TimerExpired);
        returning.advance(Action::Login);
        let outcome = returning.receive_identity_event(IdentityEvent::SignedIn {
            provider: AuthProvider::Google,
            is_new_account: false,
        });
        assert_eq!(outcome.destination(), Some(Screen::DeviceConnection));
    }

    #[test]
    fn sign_in_outside_auth_screens_is_ignored() {
        let mut controller = at_questionnaire();
        let outcome = controller.receive_identity_event(IdentityEvent::SignedIn {
            provider: AuthProvider::Email,
            is_new_account: true,
        });
        assert!(outcome.is_ignored());
        assert_eq!(controller.screen(), Screen::Questionnaire);
    }

    #[test]
    fn stale_timer_is_ignored() {
        let settings = TimerSettings::default();
        let mut controller = FlowController::new();
        drive(
            &mut controller,
            vec![
                Action::TimerExpired,
                Action::Login,
                Action::Continue,
                Action::ScanDevice,
                Action::Continue,
            ],
        );
        let ticket = controller.armed_timer(&settings).unwrap();
        assert_eq!(ticket.kind, TimerKind::DeviceConnect);

        // back out and come straight back in: a fresh entry
        controller.advance(Action::Back);
        controller.advance(Action::ScanDevice);
        controller.advance(Action::Continue);
        assert_eq!(controller.screen(), Screen::ConnectingDevice);

        assert!(controller.fire_timer(&ticket, Action::TimerExpired).is_ignored());
        assert_eq!(controller.screen(), Screen::ConnectingDevice);

        let fresh = controller.armed_timer(&settings).unwrap();
        let outcome = controller.fire_timer(&fresh, Action::TimerExpired);
        assert_eq!(outcome.destination(), Some(Screen::ConnectedDevice));
    }

    #[test]
    fn timer_rejects_foreign_action() {
        let settings = TimerSettings::default();
        let mut controller = FlowController::new();
        let ticket = controller.armed_timer(&settings).unwrap();

        assert!(controller.fire_timer(&ticket, Action::Continue).is_ignored());
        assert_eq!(controller.screen(), Screen::Loading);
    }

    #[test]
    fn disabled_auto_advance_arms_nothing() {
        let settings = TimerSettings {
            auto_advance: None,
            ..TimerSettings::default()
        };
        let mut controller = FlowController::new();
        controller.screen = Screen::ConnectedDevice;
        assert!(controller.armed_timer(&settings).is_none());
    }

    #[test]
    fn measurement_transition_emits_recorded_event_first() {
        let mut controller = at_questionnaire();
        controller.advance(Action::Back);
        controller.advance(Action::Back);

        let Outcome::Moved(transition) =
            controller.advance(Action::MeasurementComplete(reading(118, 76)))
        else {
            panic!("expected move");
        };
        let types: Vec<_> = transition.events().into_iter().map(|e| e.event_type).collect();
        assert_eq!(types, vec!["flow.measurement_recorded.v1", "flow.screen_changed.v1"]);
    }

    #[test]
    fn end_session_emits_session_ended() {
        let mut controller = at_questionnaire();
        controller.advance(Action::Submit(QuestionnaireAnswers::uniform(Answer::No)));

        let Outcome::Moved(transition) = controller.advance(Action::EndSession) else {
            panic!("expected move");
        };
        let types: Vec<_> = transition.events().into_iter().map(|e| e.event_type).collect();
        assert_eq!(types, vec!["flow.screen_changed.v1", "flow.session_ended.v1"]);
    }

    #[test]
    fn events_of_one_change_share_correlation_id() {
        let mut controller = at_questionnaire();
        controller.advance(Action::Submit(QuestionnaireAnswers::uniform(Answer::No)));

        let Outcome::Moved(transition) = controller.advance(Action::EndSession) else {
            panic!("expected move");
        };
        let expected = Some(transition.entry.to_string());
        for envelope in transition.events() {
            assert_eq!(envelope.metadata.correlation_id, expected);
        }
    }
}
