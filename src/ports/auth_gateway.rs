//! AuthGateway port - the identity provider.
//!
//! Password flows return synchronously through this port. OAuth is started
//! here but completes out of band: the provider later delivers an
//! `IdentityEvent::SignedIn` to the flow runtime.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::flow::AuthProvider;
use crate::domain::onboarding::{EmailAddress, LoginForm, PasswordResetForm, SignUpForm};

/// Why the identity provider refused a request.
///
/// These are the kinds the UI distinguishes; anything else is `Rejected`
/// with the provider's message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("Invalid email or password. Please try again.")]
    InvalidCredentials,

    #[error("Please confirm your email address before logging in.")]
    EmailNotConfirmed,

    #[error("An account with this email already exists.")]
    AccountExists,

    #[error("{0}")]
    Rejected(String),

    #[error("Auth service unavailable: {0}")]
    Unavailable(String),
}

impl AuthFailure {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Returns true if the request may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, AuthFailure::Unavailable(_))
    }
}

/// Account created by a sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCreated {
    pub email: EmailAddress,
    /// Provider requires the address to be confirmed before password login.
    pub confirmation_required: bool,
}

#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Creates an email/password account.
    async fn sign_up(&self, form: &SignUpForm) -> Result<AccountCreated, AuthFailure>;

    /// Signs in with email and password.
    async fn sign_in(&self, form: &LoginForm) -> Result<(), AuthFailure>;

    /// Begins an OAuth sign-in with `provider`.
    async fn start_oauth(&self, provider: AuthProvider) -> Result<(), AuthFailure>;

    /// Sends a password recovery link to `email`.
    async fn send_password_reset(&self, email: &EmailAddress) -> Result<(), AuthFailure>;

    /// Sets a new password for the user who followed a recovery link.
    async fn update_password(&self, form: &PasswordResetForm) -> Result<(), AuthFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn AuthGateway) {}

    #[test]
    fn only_unavailable_is_transient() {
        assert!(AuthFailure::unavailable("timeout").is_transient());
        assert!(!AuthFailure::InvalidCredentials.is_transient());
        assert!(!AuthFailure::rejected("nope").is_transient());
    }

    #[test]
    fn rejected_displays_provider_message() {
        assert_eq!(AuthFailure::rejected("Too many attempts").to_string(), "Too many attempts");
    }
}
