//! The screen transition table.
//!
//! `resolve` is the single source of truth for which actions are legal on
//! which screen. Anything it does not list is ignored by the controller.

use super::{Action, Screen};

/// Result of resolving an action against the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Leave the current screen for `Screen`.
    Move(Screen),
    /// Accepted, but the screen does not change.
    Stay,
}

/// Looks up the route for `action` on `screen`.
///
/// Returns `None` when the pair is not in the table, including payload
/// actions whose payload fails its guard.
pub fn resolve(screen: Screen, action: &Action) -> Option<Route> {
    use Screen::*;

    let target = match screen {
        Loading => match action {
            Action::TimerExpired => Landing,
            _ => return None,
        },
        Landing => match action {
            Action::ContinueWithEmail => Signup,
            Action::Login => Login,
            _ => return None,
        },
        Signup => match action {
            Action::Back | Action::Close => Landing,
            Action::Continue => Demographics,
            Action::GotoLogin => Login,
            _ => return None,
        },
        Login => match action {
            Action::Back => Landing,
            Action::GotoSignup => Signup,
            Action::Continue => DeviceConnection,
            _ => return None,
        },
        ResetPassword => match action {
            Action::Completed => Login,
            _ => return None,
        },
        Demographics => match action {
            Action::Back => Signup,
            Action::Continue => DeviceConnection,
            _ => return None,
        },
        DeviceConnection => match action {
            Action::ScanDevice => ConnectDevice,
            Action::Connect(device) if device.is_advertised() => MeasuringVitals,
            Action::Skip => Landing,
            _ => return None,
        },
        ConnectDevice => match action {
            Action::Back => DeviceConnection,
            Action::Continue => ConnectingDevice,
            _ => return None,
        },
        ConnectingDevice => match action {
            Action::TimerExpired => ConnectedDevice,
            Action::Back => DeviceConnection,
            _ => return None,
        },
        ConnectedDevice => match action {
            Action::Continue => MeasuringVitals,
            Action::Back => DeviceConnection,
            _ => return None,
        },
        MeasuringVitals => match action {
            Action::MeasurementComplete(_) => VitalResults,
            Action::Back => DeviceConnection,
            _ => return None,
        },
        VitalResults => match action {
            Action::Back => MeasuringVitals,
            Action::Continue => Questionnaire,
            _ => return None,
        },
        Questionnaire => match action {
            Action::Back => VitalResults,
            Action::Submit(answers) if answers.is_complete() => FinalResults,
            _ => return None,
        },
        FinalResults => match action {
            Action::Back => Questionnaire,
            Action::EndSession => Landing,
            Action::SaveResults => return Some(Route::Stay),
            _ => return None,
        },
    };

    Some(Route::Move(target))
}

/// Edges that stand for a confirmed form submission.
///
/// The table lists them like any other edge, but only an onboarding handler
/// may take one, after the identity provider or form validation succeeded.
pub fn requires_confirmation(screen: Screen, action: &Action) -> bool {
    matches!(
        (screen, action),
        (Screen::Signup, Action::Continue)
            | (Screen::Login, Action::Continue)
            | (Screen::Demographics, Action::Continue)
            | (Screen::ResetPassword, Action::Completed)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::onboarding::{Device, DeviceId};
    use crate::domain::vitals::{QuestionnaireAnswers, Symptom};

    #[test]
    fn form_edges_require_confirmation() {
        assert!(requires_confirmation(Screen::Signup, &Action::Continue));
        assert!(requires_confirmation(Screen::Login, &Action::Continue));
        assert!(requires_confirmation(Screen::Demographics, &Action::Continue));
        assert!(requires_confirmation(Screen::ResetPassword, &Action::Completed));

        assert!(!requires_confirmation(Screen::Signup, &Action::GotoLogin));
        assert!(!requires_confirmation(Screen::ConnectedDevice, &Action::Continue));
        assert!(!requires_confirmation(Screen::VitalResults, &Action::Continue));
    }

    #[test]
    fn loading_only_leaves_on_timer() {
        assert_eq!(
            resolve(Screen::Loading, &Action::TimerExpired),
            Some(Route::Move(Screen::Landing))
        );
        for action in Action::representatives() {
            if action != Action::TimerExpired {
                assert_eq!(resolve(Screen::Loading, &action), None, "{action}");
            }
        }
    }

    #[test]
    fn signup_back_and_close_both_return_to_landing() {
        assert_eq!(resolve(Screen::Signup, &Action::Back), Some(Route::Move(Screen::Landing)));
        assert_eq!(resolve(Screen::Signup, &Action::Close), Some(Route::Move(Screen::Landing)));
    }

    #[test]
    fn connect_requires_an_advertised_device() {
        let rogue = Device {
            id: DeviceId::new("rogue"),
            name: "Rogue".to_string(),
            status: String::new(),
        };
        assert_eq!(resolve(Screen::DeviceConnection, &Action::Connect(rogue)), None);

        let known = Device::find("health-monitor-pro").unwrap();
        assert_eq!(
            resolve(Screen::DeviceConnection, &Action::Connect(known)),
            Some(Route::Move(Screen::MeasuringVitals))
        );
    }

    #[test]
    fn submit_requires_every_answer() {
        let partial = QuestionnaireAnswers::new()
            .with(Symptom::Dizzy, false)
            .with(Symptom::Headaches, false)
            .with(Symptom::Nausea, false);
        assert_eq!(resolve(Screen::Questionnaire, &Action::Submit(partial)), None);

        let complete = partial.with(Symptom::VisionChanges, true);
        assert_eq!(
            resolve(Screen::Questionnaire, &Action::Submit(complete)),
            Some(Route::Move(Screen::FinalResults))
        );
    }

    #[test]
    fn save_results_stays_on_final_results() {
        assert_eq!(resolve(Screen::FinalResults, &Action::SaveResults), Some(Route::Stay));
        assert_eq!(resolve(Screen::Questionnaire, &Action::SaveResults), None);
    }

    #[test]
    fn every_screen_has_a_way_back_or_forward() {
        for screen in Screen::all() {
            let legal = Action::representatives()
                .iter()
                .filter(|a| matches!(resolve(*screen, a), Some(Route::Move(_))))
                .count();
            assert!(legal > 0, "{screen} is a dead end");
        }
    }

    #[test]
    fn table_matches_expected_edges() {
        let expected: &[(Screen, &str, Screen)] = &[
            (Screen::Loading, "timerExpired", Screen::Landing),
            (Screen::Landing, "continueWithEmail", Screen::Signup),
            (Screen::Landing, "login", Screen::Login),
            (Screen::Signup, "back", Screen::Landing),
            (Screen::Signup, "close", Screen::Landing),
            (Screen::Signup, "continue", Screen::Demographics),
            (Screen::Signup, "gotoLogin", Screen::Login),
            (Screen::Login, "back", Screen::Landing),
            (Screen::Login, "gotoSignup", Screen::Signup),
            (Screen::Login, "continue", Screen::DeviceConnection),
            (Screen::ResetPassword, "completed", Screen::Login),
            (Screen::Demographics, "back", Screen::Signup),
            (Screen::Demographics, "continue", Screen::DeviceConnection),
            (Screen::DeviceConnection, "scanDevice", Screen::ConnectDevice),
            (Screen::DeviceConnection, "connect", Screen::MeasuringVitals),
            (Screen::DeviceConnection, "skip", Screen::Landing),
            (Screen::ConnectDevice, "back", Screen::DeviceConnection),
            (Screen::ConnectDevice, "continue", Screen::ConnectingDevice),
            (Screen::ConnectingDevice, "timerExpired", Screen::ConnectedDevice),
            (Screen::ConnectingDevice, "back", Screen::DeviceConnection),
            (Screen::ConnectedDevice, "continue", Screen::MeasuringVitals),
            (Screen::ConnectedDevice, "back", Screen::DeviceConnection),
            (Screen::MeasuringVitals, "back", Screen::DeviceConnection),
            (Screen::MeasuringVitals, "measurementComplete", Screen::VitalResults),
            (Screen::VitalResults, "back", Screen::MeasuringVitals),
            (Screen::VitalResults, "continue", Screen::Questionnaire),
            (Screen::Questionnaire, "back", Screen::VitalResults),
            (Screen::Questionnaire, "submit", Screen::FinalResults),
            (Screen::FinalResults, "back", Screen::Questionnaire),
            (Screen::FinalResults, "endSession", Screen::Landing),
        ];

        let mut actual = Vec::new();
        for screen in Screen::all() {
            for action in Action::representatives() {
                if let Some(Route::Move(to)) = resolve(*screen, &action) {
                    actual.push((*screen, action.name(), to));
                }
            }
        }

        assert_eq!(actual.len(), expected.len());
        for edge in expected {
            assert!(actual.contains(edge), "missing edge {:?}", edge);
        }
    }
}
