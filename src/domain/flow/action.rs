//! Actions fed to the flow controller.
//!
//! User intents from the screens and timer expiries share one enum so the
//! transition table can match on both.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::onboarding::Device;
use crate::domain::vitals::{Answer, QuestionnaireAnswers, VitalsReading};

/// A user intent or timer outcome presented to the flow controller.
///
/// Actions that carry a payload are validated by the transition table: a
/// `Connect` for a device outside the catalog, or a `Submit` with unanswered
/// questions, is not a legal transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Action {
    TimerExpired,
    ContinueWithEmail,
    Login,
    Back,
    Close,
    Continue,
    GotoLogin,
    GotoSignup,
    Completed,
    ScanDevice,
    Connect(Device),
    Skip,
    MeasurementComplete(VitalsReading),
    Submit(QuestionnaireAnswers),
    SaveResults,
    EndSession,
}

impl Action {
    /// Stable name used in logs and events.
    pub fn name(&self) -> &'static str {
        match self {
            Action::TimerExpired => "timerExpired",
            Action::ContinueWithEmail => "continueWithEmail",
            Action::Login => "login",
            Action::Back => "back",
            Action::Close => "close",
            Action::Continue => "continue",
            Action::GotoLogin => "gotoLogin",
            Action::GotoSignup => "gotoSignup",
            Action::Completed => "completed",
            Action::ScanDevice => "scanDevice",
            Action::Connect(_) => "connect",
            Action::Skip => "skip",
            Action::MeasurementComplete(_) => "measurementComplete",
            Action::Submit(_) => "submit",
            Action::SaveResults => "saveResults",
            Action::EndSession => "endSession",
        }
    }

    /// One instance of every action, payloads filled with valid values.
    pub fn representatives() -> Vec<Action> {
        let device = Device::catalog().into_iter().next();
        let mut actions = vec![
            Action::TimerExpired,
            Action::ContinueWithEmail,
            Action::Login,
            Action::Back,
            Action::Close,
            Action::Continue,
            Action::GotoLogin,
            Action::GotoSignup,
            Action::Completed,
            Action::ScanDevice,
        ];
        actions.extend(device.map(Action::Connect));
        actions.push(Action::Skip);
        actions.extend(VitalsReading::new(118, 76).ok().map(Action::MeasurementComplete));
        actions.push(Action::Submit(QuestionnaireAnswers::uniform(Answer::No)));
        actions.push(Action::SaveResults);
        actions.push(Action::EndSession);
        actions
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
