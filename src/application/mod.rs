//! Application layer - the flow runtime and command handlers.
//!
//! The runtime owns the flow controller and serialises every input to it.
//! Handlers sit in front of it for screens whose `continue` depends on a
//! form or on the identity provider.

pub mod handlers;
mod runtime;

pub use handlers::{
    OnboardingError, RequestPasswordResetCommand, RequestPasswordResetHandler,
    RequestPasswordResetResult, ResetPasswordCommand, ResetPasswordHandler, ResetPasswordResult,
    StartOAuthCommand, StartOAuthHandler, StartOAuthResult, SubmitDemographicsCommand,
    SubmitDemographicsHandler, SubmitDemographicsResult, SubmitLoginCommand, SubmitLoginHandler,
    SubmitLoginResult, SubmitSignUpCommand, SubmitSignUpHandler, SubmitSignUpResult,
};
pub use runtime::{FlowHandle, FlowRuntime, RuntimePorts};
