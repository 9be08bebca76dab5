//! Screen enum - the controller's state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

use super::transition::{resolve, Route};
use super::Action;

/// One discrete step of the onboarding journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum Screen {
    #[default]
    Loading,
    Landing,
    Signup,
    Login,
    ResetPassword,
    Demographics,
    DeviceConnection,
    ConnectDevice,
    ConnectingDevice,
    ConnectedDevice,
    MeasuringVitals,
    VitalResults,
    Questionnaire,
    FinalResults,
}

impl Screen {
    /// Returns every screen in journey order.
    pub fn all() -> &'static [Screen] {
        &[
            Screen::Loading,
            Screen::Landing,
            Screen::Signup,
            Screen::Login,
            Screen::ResetPassword,
            Screen::Demographics,
            Screen::DeviceConnection,
            Screen::ConnectDevice,
            Screen::ConnectingDevice,
            Screen::ConnectedDevice,
            Screen::MeasuringVitals,
            Screen::VitalResults,
            Screen::Questionnaire,
            Screen::FinalResults,
        ]
    }

    /// Stable identifier, as used in events and console output.
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Loading => "loading",
            Screen::Landing => "landing",
            Screen::Signup => "signup",
            Screen::Login => "login",
            Screen::ResetPassword => "resetPassword",
            Screen::Demographics => "demographics",
            Screen::DeviceConnection => "deviceConnection",
            Screen::ConnectDevice => "connectDevice",
            Screen::ConnectingDevice => "connectingDevice",
            Screen::ConnectedDevice => "connectedDevice",
            Screen::MeasuringVitals => "measuringVitals",
            Screen::VitalResults => "vitalResults",
            Screen::Questionnaire => "questionnaire",
            Screen::FinalResults => "finalResults",
        }
    }

    /// Screens from which an OAuth sign-in can have been started.
    ///
    /// A `signedIn` identity event is only honoured while one of these is
    /// current.
    pub fn awaits_authentication(&self) -> bool {
        matches!(self, Screen::Landing | Screen::Signup | Screen::Login)
    }

    /// Fixed progress shown by screens with a completion bar.
    ///
    /// Form screens and screens without a bar report 0.
    pub fn completion_percent(&self) -> u8 {
        match self {
            Screen::ConnectDevice => 10,
            Screen::ConnectingDevice | Screen::ConnectedDevice => 20,
            Screen::MeasuringVitals => 40,
            Screen::VitalResults | Screen::Questionnaire => 70,
            Screen::FinalResults => 100,
            Screen::Loading
            | Screen::Landing
            | Screen::Signup
            | Screen::Login
            | Screen::ResetPassword
            | Screen::Demographics
            | Screen::DeviceConnection => 0,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl StateMachine for Screen {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    /// Targets reachable through the transition table with a representative
    /// payload for each action. Identity-event overrides are not included.
    fn valid_transitions(&self) -> Vec<Self> {
        let mut targets = Vec::new();
        for action in Action::representatives() {
            if let Some(Route::Move(target)) = resolve(*self, &action) {
                if !targets.contains(&target) {
                    targets.push(target);
                }
            }
        }
        targets
    }
}
