//! Error type shared by the onboarding handlers.

use thiserror::Error;

use crate::domain::flow::Screen;
use crate::domain::foundation::{DomainError, ValidationError};
use crate::ports::AuthFailure;

#[derive(Debug, Error)]
pub enum OnboardingError {
    /// A form field failed validation; nothing was sent.
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    /// The identity provider refused the request.
    #[error(transparent)]
    Auth(#[from] AuthFailure),

    /// The form does not belong to the screen currently showing.
    #[error("Not available on the {actual} screen")]
    WrongScreen { actual: Screen },

    /// The flow runtime failed.
    #[error(transparent)]
    Flow(#[from] DomainError),
}

impl OnboardingError {
    /// Field to highlight, for validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            OnboardingError::Invalid(e) => Some(e.field()),
            _ => None,
        }
    }
}
