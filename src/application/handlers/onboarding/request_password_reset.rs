//! RequestPasswordResetHandler - "forgot password" on the login screen.

use std::sync::Arc;
use tracing::info;

use crate::application::FlowHandle;
use crate::domain::flow::Screen;
use crate::domain::onboarding::EmailAddress;
use crate::ports::AuthGateway;

use super::{require_screen, OnboardingError};

#[derive(Debug, Clone)]
pub struct RequestPasswordResetCommand {
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct RequestPasswordResetResult {
    pub sent_to: EmailAddress,
}

/// Sends a recovery link. The screen does not change; following the link
/// later arrives as a password recovery identity event.
pub struct RequestPasswordResetHandler {
    auth: Arc<dyn AuthGateway>,
    flow: FlowHandle,
}

impl RequestPasswordResetHandler {
    pub fn new(auth: Arc<dyn AuthGateway>, flow: FlowHandle) -> Self {
        Self { auth, flow }
    }

    pub async fn handle(
        &self,
        cmd: RequestPasswordResetCommand,
    ) -> Result<RequestPasswordResetResult, OnboardingError> {
        require_screen(&self.flow, |s| s == Screen::Login).await?;

        let email = EmailAddress::new(&cmd.email)?;
        self.auth.send_password_reset(&email).await?;
        info!("Password reset link sent");

        Ok(RequestPasswordResetResult { sent_to: email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockAuthGateway;
    use crate::application::handlers::onboarding::test_support::{flow_on, screen};

    #[tokio::test]
    async fn sends_link_without_moving() {
        let flow = flow_on(Screen::Login).await;
        let auth = Arc::new(MockAuthGateway::new());
        let handler = RequestPasswordResetHandler::new(auth.clone(), flow.clone());

        let result = handler
            .handle(RequestPasswordResetCommand {
                email: "ada@example.com".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.sent_to.as_str(), "ada@example.com");
        assert_eq!(auth.recovery_email(), Some(result.sent_to));
        assert_eq!(screen(&flow).await, Screen::Login);
    }

    #[tokio::test]
    async fn blank_email_is_rejected() {
        let flow = flow_on(Screen::Login).await;
        let handler = RequestPasswordResetHandler::new(Arc::new(MockAuthGateway::new()), flow);

        let err = handler
            .handle(RequestPasswordResetCommand {
                email: "  ".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.field(), Some("email"));
    }
}
