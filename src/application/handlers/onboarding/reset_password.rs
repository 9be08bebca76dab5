//! ResetPasswordHandler - set a new password after following a recovery link.

use secrecy::SecretString;
use std::sync::Arc;
use tracing::info;

use crate::application::FlowHandle;
use crate::domain::flow::{Action, Outcome, Screen};
use crate::domain::onboarding::PasswordResetForm;
use crate::ports::AuthGateway;

use super::{require_screen, OnboardingError};

#[derive(Debug, Clone)]
pub struct ResetPasswordCommand {
    pub password: SecretString,
    pub confirmation: SecretString,
}

#[derive(Debug, Clone)]
pub struct ResetPasswordResult {
    pub outcome: Outcome,
}

pub struct ResetPasswordHandler {
    auth: Arc<dyn AuthGateway>,
    flow: FlowHandle,
}

impl ResetPasswordHandler {
    pub fn new(auth: Arc<dyn AuthGateway>, flow: FlowHandle) -> Self {
        Self { auth, flow }
    }

    pub async fn handle(
        &self,
        cmd: ResetPasswordCommand,
    ) -> Result<ResetPasswordResult, OnboardingError> {
        require_screen(&self.flow, |s| s == Screen::ResetPassword).await?;

        let form = PasswordResetForm::new(cmd.password, cmd.confirmation)?;
        self.auth.update_password(&form).await?;
        info!("Password updated");

        let outcome = self
            .flow
            .dispatch_from(Screen::ResetPassword, Action::Completed)
            .await?;
        Ok(ResetPasswordResult { outcome })
    }
}
