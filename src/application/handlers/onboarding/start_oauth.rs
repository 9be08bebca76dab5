//! StartOAuthHandler - begin a third-party sign-in.

use std::sync::Arc;
use tracing::info;

use crate::application::FlowHandle;
use crate::domain::flow::AuthProvider;
use crate::ports::AuthGateway;

use super::{require_screen, OnboardingError};

#[derive(Debug, Clone)]
pub struct StartOAuthCommand {
    pub provider: AuthProvider,
}

#[derive(Debug, Clone)]
pub struct StartOAuthResult {
    pub provider: AuthProvider,
}

/// Hands off to the provider. Completion arrives later as a `SignedIn`
/// identity event, which is what moves the flow.
pub struct StartOAuthHandler {
    auth: Arc<dyn AuthGateway>,
    flow: FlowHandle,
}

impl StartOAuthHandler {
    pub fn new(auth: Arc<dyn AuthGateway>, flow: FlowHandle) -> Self {
        Self { auth, flow }
    }

    pub async fn handle(&self, cmd: StartOAuthCommand) -> Result<StartOAuthResult, OnboardingError> {
        require_screen(&self.flow, |s| s.awaits_authentication()).await?;

        self.auth.start_oauth(cmd.provider).await?;
        info!(provider = %cmd.provider, "OAuth sign-in started");

        Ok(StartOAuthResult {
            provider: cmd.provider,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockAuthGateway;
    use crate::application::handlers::onboarding::test_support::{flow, flow_on, screen};
    use crate::domain::flow::{IdentityEvent, Screen};

    #[tokio::test]
    async fn start_then_callback_moves_new_user_to_demographics() {
        let flow = flow_on(Screen::Landing).await;
        let auth = Arc::new(MockAuthGateway::new());
        let handler = StartOAuthHandler::new(auth.clone(), flow.clone());

        handler
            .handle(StartOAuthCommand {
                provider: AuthProvider::Google,
            })
            .await
            .unwrap();
        assert_eq!(auth.oauth_requests(), vec![AuthProvider::Google]);
        assert_eq!(screen(&flow).await, Screen::Landing);

        let outcome = flow
            .identity(IdentityEvent::SignedIn {
                provider: AuthProvider::Google,
                is_new_account: true,
            })
            .await
            .unwrap();
        assert_eq!(outcome.destination(), Some(Screen::Demographics));
    }

    #[tokio::test]
    async fn not_offered_during_splash() {
        let handler = StartOAuthHandler::new(Arc::new(MockAuthGateway::new()), flow());

        let err = handler
            .handle(StartOAuthCommand {
                provider: AuthProvider::Google,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, OnboardingError::WrongScreen { actual: Screen::Loading }));
    }
}
