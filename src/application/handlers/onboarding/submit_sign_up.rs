//! SubmitSignUpHandler - create an email/password account and move on.

use secrecy::SecretString;
use std::sync::Arc;
use tracing::info;

use crate::application::FlowHandle;
use crate::domain::flow::{Action, Outcome, Screen};
use crate::domain::onboarding::SignUpForm;
use crate::ports::{AccountCreated, AuthGateway};

use super::{require_screen, OnboardingError};

#[derive(Debug, Clone)]
pub struct SubmitSignUpCommand {
    pub first_name: String,
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Clone)]
pub struct SubmitSignUpResult {
    pub account: AccountCreated,
    pub outcome: Outcome,
}

pub struct SubmitSignUpHandler {
    auth: Arc<dyn AuthGateway>,
    flow: FlowHandle,
}

impl SubmitSignUpHandler {
    pub fn new(auth: Arc<dyn AuthGateway>, flow: FlowHandle) -> Self {
        Self { auth, flow }
    }

    pub async fn handle(
        &self,
        cmd: SubmitSignUpCommand,
    ) -> Result<SubmitSignUpResult, OnboardingError> {
        // 1. Only from the sign-up screen
        require_screen(&self.flow, |s| s == Screen::Signup).await?;

        // 2. Validate form
        let form = SignUpForm::new(cmd.first_name, cmd.email, cmd.password)?;

        // 3. Create account
        let account = self.auth.sign_up(&form).await?;
        info!(
            confirmation_required = account.confirmation_required,
            "Account created"
        );

        // 4. Advance to demographics
        let outcome = self
            .flow
            .dispatch_from(Screen::Signup, Action::Continue)
            .await?;

        Ok(SubmitSignUpResult { account, outcome })
    }
}
