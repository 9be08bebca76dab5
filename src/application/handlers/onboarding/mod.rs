//! Onboarding command handlers.
//!
//! Each handler checks that its screen is showing, validates the form and
//! talks to the identity provider where needed. Only then does it advance,
//! through `FlowHandle::dispatch_from`, so the confirmed edge is taken only
//! if the same screen is still showing. A failure at any step leaves the
//! screen unchanged.

mod error;
mod request_password_reset;
mod reset_password;
mod start_oauth;
mod submit_demographics;
mod submit_login;
mod submit_sign_up;

pub use error::OnboardingError;
pub use request_password_reset::{
    RequestPasswordResetCommand, RequestPasswordResetHandler, RequestPasswordResetResult,
};
pub use reset_password::{ResetPasswordCommand, ResetPasswordHandler, ResetPasswordResult};
pub use start_oauth::{StartOAuthCommand, StartOAuthHandler, StartOAuthResult};
pub use submit_demographics::{
    SubmitDemographicsCommand, SubmitDemographicsHandler, SubmitDemographicsResult,
};
pub use submit_login::{SubmitLoginCommand, SubmitLoginHandler, SubmitLoginResult};
pub use submit_sign_up::{SubmitSignUpCommand, SubmitSignUpHandler, SubmitSignUpResult};

use crate::application::FlowHandle;
use crate::domain::flow::Screen;

/// Fails with `WrongScreen` unless `allowed` accepts the current screen.
async fn require_screen(
    flow: &FlowHandle,
    allowed: impl Fn(Screen) -> bool,
) -> Result<(), OnboardingError> {
    let actual = flow.snapshot().await?.screen;
    if allowed(actual) {
        Ok(())
    } else {
        Err(OnboardingError::WrongScreen { actual })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use async_trait::async_trait;
    use std::sync::Arc;
    use tokio::sync::Notify;

    use crate::adapters::{
        InMemoryEventBus, InMemoryResultsStore, MockAuthGateway, SimulatedVitalsSource,
    };
    use crate::application::{FlowHandle, FlowRuntime, RuntimePorts};
    use crate::domain::flow::{Action, AuthProvider, Screen, TimerSettings};
    use crate::domain::onboarding::{EmailAddress, LoginForm, PasswordResetForm, SignUpForm};
    use crate::ports::{AccountCreated, AuthFailure, AuthGateway};

    pub fn flow() -> FlowHandle {
        let ports = RuntimePorts {
            events: Arc::new(InMemoryEventBus::new()),
            results: Arc::new(InMemoryResultsStore::new()),
            vitals: Arc::new(SimulatedVitalsSource::new().unwrap()),
        };
        FlowRuntime::spawn(TimerSettings::default(), ports).0
    }

    /// Drives a fresh flow onto `screen` through the transition table.
    pub async fn flow_on(screen: Screen) -> FlowHandle {
        let handle = flow();
        let path: &[Action] = match screen {
            Screen::Landing => &[Action::TimerExpired],
            Screen::Signup => &[Action::TimerExpired, Action::ContinueWithEmail],
            Screen::Login => &[Action::TimerExpired, Action::Login],
            Screen::Demographics => &[Action::TimerExpired, Action::ContinueWithEmail],
            other => panic!("no test path to {other}"),
        };
        for action in path {
            handle.dispatch(action.clone()).await.unwrap();
        }
        if screen == Screen::Demographics {
            handle
                .dispatch_from(Screen::Signup, Action::Continue)
                .await
                .unwrap();
        }
        assert_eq!(handle.snapshot().await.unwrap().screen, screen);
        handle
    }

    pub async fn screen(flow: &FlowHandle) -> Screen {
        flow.snapshot().await.unwrap().screen
    }

    /// Gateway that parks every call until `release` is called, so a test
    /// can act on the flow while the provider is still answering.
    pub struct HeldAuthGateway {
        inner: MockAuthGateway,
        entered: Notify,
        gate: Notify,
    }

    impl HeldAuthGateway {
        pub fn new(inner: MockAuthGateway) -> Self {
            Self {
                inner,
                entered: Notify::new(),
                gate: Notify::new(),
            }
        }

        /// Resolves once a call is parked.
        pub async fn wait_for_call(&self) {
            self.entered.notified().await;
        }

        pub fn release(&self) {
            self.gate.notify_one();
        }

        async fn hold(&self) {
            self.entered.notify_one();
            self.gate.notified().await;
        }
    }

    #[async_trait]
    impl AuthGateway for HeldAuthGateway {
        async fn sign_up(&self, form: &SignUpForm) -> Result<AccountCreated, AuthFailure> {
            self.hold().await;
            self.inner.sign_up(form).await
        }

        async fn sign_in(&self, form: &LoginForm) -> Result<(), AuthFailure> {
            self.hold().await;
            self.inner.sign_in(form).await
        }

        async fn start_oauth(&self, provider: AuthProvider) -> Result<(), AuthFailure> {
            self.hold().await;
            self.inner.start_oauth(provider).await
        }

        async fn send_password_reset(&self, email: &EmailAddress) -> Result<(), AuthFailure> {
            self.hold().await;
            self.inner.send_password_reset(email).await
        }

        async fn update_password(&self, form: &PasswordResetForm) -> Result<(), AuthFailure> {
            self.hold().await;
            self.inner.update_password(form).await
        }
    }
}
