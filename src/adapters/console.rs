//! Console command parser.
//!
//! Turns one line typed at the prompt into a `ConsoleCommand`. Form fields
//! are passed through raw; validation is the handlers' job.

use secrecy::SecretString;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::flow::{Action, AuthProvider, IdentityEvent};
use crate::domain::onboarding::Device;
use crate::domain::vitals::{QuestionnaireAnswers, Symptom, VitalsReading};

/// Help text listing every command.
pub const HELP: &str = "\
navigation:  continue | back | close | email | login | goto-login | goto-signup
             completed | scan | connect <device-id> | skip | save | end
vitals:      measure <sys>/<dia> | submit <y|n> <y|n> <y|n> <y|n>
forms:       signup <first-name> <email> <password> | signin <email> <password>
             forgot <email> | reset <password> <confirm>
             demographics <age> <weight> <kg|lbs> <gender>
identity:    google | recovery | signed-in <google|email> <new|returning>
other:       status | devices | help | quit";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}', type 'help' for a list")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("{0}")]
    Invalid(String),
}

/// One parsed console line.
#[derive(Debug, Clone)]
pub enum ConsoleCommand {
    /// Dispatch an action straight to the flow.
    Act(Action),
    /// Simulate a notification from the identity provider.
    Identity(IdentityEvent),
    SignUp {
        first_name: String,
        email: String,
        password: SecretString,
    },
    SignIn {
        email: String,
        password: SecretString,
    },
    ForgotPassword {
        email: String,
    },
    ResetPassword {
        password: SecretString,
        confirmation: SecretString,
    },
    Demographics {
        age: String,
        weight: String,
        weight_unit: String,
        gender: String,
    },
    /// Start a Google OAuth sign-in.
    Google,
    Status,
    Devices,
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(ParseError::Empty)?.to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let simple = |action: Action| -> Result<ConsoleCommand, ParseError> {
            Ok(ConsoleCommand::Act(action))
        };

        match command.as_str() {
            "continue" => simple(Action::Continue),
            "back" => simple(Action::Back),
            "close" => simple(Action::Close),
            "email" => simple(Action::ContinueWithEmail),
            "login" => simple(Action::Login),
            "goto-login" => simple(Action::GotoLogin),
            "goto-signup" => simple(Action::GotoSignup),
            "completed" => simple(Action::Completed),
            "scan" => simple(Action::ScanDevice),
            "skip" => simple(Action::Skip),
            "save" => simple(Action::SaveResults),
            "end" => simple(Action::EndSession),
            "connect" => {
                let [id] = args[..] else {
                    return Err(ParseError::Usage("connect <device-id>"));
                };
                let device = Device::find(id)
                    .ok_or_else(|| ParseError::Invalid(format!("no device '{id}', try 'devices'")))?;
                simple(Action::Connect(device))
            }
            "measure" => {
                let [raw] = args[..] else {
                    return Err(ParseError::Usage("measure <sys>/<dia>"));
                };
                simple(Action::MeasurementComplete(parse_reading(raw)?))
            }
            "submit" => {
                if args.len() != Symptom::all().len() {
                    return Err(ParseError::Usage("submit <y|n> <y|n> <y|n> <y|n>"));
                }
                let mut answers = QuestionnaireAnswers::new();
                for (symptom, raw) in Symptom::all().iter().zip(&args) {
                    answers.set(*symptom, parse_yes_no(raw)?);
                }
                simple(Action::Submit(answers))
            }
            "signup" => match args[..] {
                [first_name, email, password] => Ok(ConsoleCommand::SignUp {
                    first_name: first_name.to_string(),
                    email: email.to_string(),
                    password: secret(password),
                }),
                _ => Err(ParseError::Usage("signup <first-name> <email> <password>")),
            },
            "signin" => match args[..] {
                [email, password] => Ok(ConsoleCommand::SignIn {
                    email: email.to_string(),
                    password: secret(password),
                }),
                _ => Err(ParseError::Usage("signin <email> <password>")),
            },
            "forgot" => match args[..] {
                [email] => Ok(ConsoleCommand::ForgotPassword {
                    email: email.to_string(),
                }),
                _ => Err(ParseError::Usage("forgot <email>")),
            },
            "reset" => match args[..] {
                [password, confirmation] => Ok(ConsoleCommand::ResetPassword {
                    password: secret(password),
                    confirmation: secret(confirmation),
                }),
                _ => Err(ParseError::Usage("reset <password> <confirm>")),
            },
            "demographics" => match args[..] {
                [age, weight, weight_unit, gender] => Ok(ConsoleCommand::Demographics {
                    age: age.to_string(),
                    weight: weight.to_string(),
                    weight_unit: weight_unit.to_string(),
                    gender: gender.to_string(),
                }),
                _ => Err(ParseError::Usage(
                    "demographics <age> <weight> <kg|lbs> <gender>",
                )),
            },
            "google" => Ok(ConsoleCommand::Google),
            "recovery" => Ok(ConsoleCommand::Identity(
                IdentityEvent::PasswordRecoveryRequested,
            )),
            "signed-in" => {
                let [provider, age] = args[..] else {
                    return Err(ParseError::Usage("signed-in <google|email> <new|returning>"));
                };
                let provider = match provider {
                    "google" => AuthProvider::Google,
                    "email" => AuthProvider::Email,
                    other => return Err(ParseError::Invalid(format!("unknown provider '{other}'"))),
                };
                let is_new_account = match age {
                    "new" => true,
                    "returning" => false,
                    other => return Err(ParseError::Invalid(format!("expected new or returning, got '{other}'"))),
                };
                Ok(ConsoleCommand::Identity(IdentityEvent::SignedIn {
                    provider,
                    is_new_account,
                }))
            }
            "status" => Ok(ConsoleCommand::Status),
            "devices" => Ok(ConsoleCommand::Devices),
            "help" | "?" => Ok(ConsoleCommand::Help),
            "quit" | "exit" => Ok(ConsoleCommand::Quit),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

fn secret(raw: &str) -> SecretString {
    SecretString::new(raw.to_string())
}

fn parse_reading(raw: &str) -> Result<VitalsReading, ParseError> {
    let (systolic, diastolic) = raw
        .split_once('/')
        .ok_or(ParseError::Usage("measure <sys>/<dia>"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<u16>()
            .map_err(|_| ParseError::Invalid(format!("'{part}' is not a number")))
    };
    VitalsReading::new(parse(systolic)?, parse(diastolic)?)
        .map_err(|e| ParseError::Invalid(e.to_string()))
}

fn parse_yes_no(raw: &str) -> Result<bool, ParseError> {
    match raw.to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        other => Err(ParseError::Invalid(format!("expected y or n, got '{other}'"))),
    }
}
