//! SubmitLoginHandler - password sign-in.

use secrecy::SecretString;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::FlowHandle;
use crate::domain::flow::{Action, Outcome, Screen};
use crate::domain::onboarding::LoginForm;
use crate::ports::AuthGateway;

use super::{require_screen, OnboardingError};

#[derive(Debug, Clone)]
pub struct SubmitLoginCommand {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Clone)]
pub struct SubmitLoginResult {
    pub outcome: Outcome,
}

pub struct SubmitLoginHandler {
    auth: Arc<dyn AuthGateway>,
    flow: FlowHandle,
}

impl SubmitLoginHandler {
    pub fn new(auth: Arc<dyn AuthGateway>, flow: FlowHandle) -> Self {
        Self { auth, flow }
    }

    pub async fn handle(&self, cmd: SubmitLoginCommand) -> Result<SubmitLoginResult, OnboardingError> {
        require_screen(&self.flow, |s| s == Screen::Login).await?;

        let form = LoginForm::new(cmd.email, cmd.password)?;

        if let Err(e) = self.auth.sign_in(&form).await {
            warn!(error = %e, "Sign-in refused");
            return Err(e.into());
        }
        info!("Signed in with password");

        let outcome = self
            .flow
            .dispatch_from(Screen::Login, Action::Continue)
            .await?;
        Ok(SubmitLoginResult { outcome })
    }
}
