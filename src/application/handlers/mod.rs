//! Application handlers.
//!
//! Command handlers that validate input, call out through ports and then
//! advance the flow.

pub mod onboarding;

pub use onboarding::{
    OnboardingError, RequestPasswordResetCommand, RequestPasswordResetHandler,
    RequestPasswordResetResult, ResetPasswordCommand, ResetPasswordHandler, ResetPasswordResult,
    StartOAuthCommand, StartOAuthHandler, StartOAuthResult, SubmitDemographicsCommand,
    SubmitDemographicsHandler, SubmitDemographicsResult, SubmitLoginCommand, SubmitLoginHandler,
    SubmitLoginResult, SubmitSignUpCommand, SubmitSignUpHandler, SubmitSignUpResult,
};
