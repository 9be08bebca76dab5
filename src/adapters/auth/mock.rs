//! Mock identity provider.
//!
//! Keeps accounts in memory and answers the way a hosted auth service does:
//! unknown addresses and wrong passwords both report invalid credentials,
//! unconfirmed accounts cannot log in, and a password update needs a
//! recovery link to have been sent first.
//!
//! # Example
//!
//! ```ignore
//! let gateway = MockAuthGateway::new()
//!     .with_account("ada@example.com", "hunter22");
//!
//! gateway.sign_in(&LoginForm::new("ada@example.com", secret("hunter22"))?).await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::flow::AuthProvider;
use crate::domain::onboarding::{EmailAddress, LoginForm, PasswordResetForm, SignUpForm};
use crate::ports::{AccountCreated, AuthFailure, AuthGateway};

#[derive(Debug)]
struct Account {
    password: SecretString,
    confirmed: bool,
}

/// In-memory `AuthGateway`.
#[derive(Debug, Default)]
pub struct MockAuthGateway {
    accounts: RwLock<HashMap<String, Account>>,
    /// New sign-ups start unconfirmed when set.
    require_confirmation: bool,
    /// Address the last recovery link was sent to.
    recovering: RwLock<Option<EmailAddress>>,
    oauth_requests: RwLock<Vec<AuthProvider>>,
    /// Optional error to return for every call (for error testing)
    force_error: RwLock<Option<AuthFailure>>,
}

impl MockAuthGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a confirmed account.
    pub fn with_account(self, email: &str, password: &str) -> Self {
        self.insert(email, password, true);
        self
    }

    /// Registers an account whose email is not yet confirmed.
    pub fn with_unconfirmed_account(self, email: &str, password: &str) -> Self {
        self.insert(email, password, false);
        self
    }

    /// Makes new sign-ups wait for email confirmation.
    pub fn requiring_confirmation(mut self) -> Self {
        self.require_confirmation = true;
        self
    }

    /// Forces every call to fail with `error`.
    pub fn with_error(self, error: AuthFailure) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }

    /// Clears the forced error and returns to normal operation.
    pub fn clear_error(&self) {
        *self.force_error.write().unwrap() = None;
    }

    /// Marks an account as confirmed.
    pub fn confirm(&self, email: &str) {
        if let Some(account) = self.accounts.write().unwrap().get_mut(&email.to_ascii_lowercase()) {
            account.confirmed = true;
        }
    }

    /// Providers an OAuth sign-in was started with, oldest first.
    pub fn oauth_requests(&self) -> Vec<AuthProvider> {
        self.oauth_requests.read().unwrap().clone()
    }

    /// Address a recovery link was last sent to.
    pub fn recovery_email(&self) -> Option<EmailAddress> {
        self.recovering.read().unwrap().clone()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.read().unwrap().len()
    }

    fn insert(&self, email: &str, password: &str, confirmed: bool) {
        self.accounts.write().unwrap().insert(
            email.to_ascii_lowercase(),
            Account {
                password: SecretString::new(password.to_string()),
                confirmed,
            },
        );
    }

    fn check_forced(&self) -> Result<(), AuthFailure> {
        match self.force_error.read().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AuthGateway for MockAuthGateway {
    async fn sign_up(&self, form: &SignUpForm) -> Result<AccountCreated, AuthFailure> {
        self.check_forced()?;

        let key = form.email().as_str().to_ascii_lowercase();
        let mut accounts = self.accounts.write().unwrap();
        if accounts.contains_key(&key) {
            return Err(AuthFailure::AccountExists);
        }
        accounts.insert(
            key,
            Account {
                password: form.password().clone(),
                confirmed: !self.require_confirmation,
            },
        );

        Ok(AccountCreated {
            email: form.email().clone(),
            confirmation_required: self.require_confirmation,
        })
    }

    async fn sign_in(&self, form: &LoginForm) -> Result<(), AuthFailure> {
        self.check_forced()?;

        let accounts = self.accounts.read().unwrap();
        let account = accounts
            .get(&form.email().as_str().to_ascii_lowercase())
            .ok_or(AuthFailure::InvalidCredentials)?;
        if account.password.expose_secret() != form.password().expose_secret() {
            return Err(AuthFailure::InvalidCredentials);
        }
        if !account.confirmed {
            return Err(AuthFailure::EmailNotConfirmed);
        }
        Ok(())
    }

    async fn start_oauth(&self, provider: AuthProvider) -> Result<(), AuthFailure> {
        self.check_forced()?;
        self.oauth_requests.write().unwrap().push(provider);
        Ok(())
    }

    async fn send_password_reset(&self, email: &EmailAddress) -> Result<(), AuthFailure> {
        self.check_forced()?;
        // unknown addresses succeed too
        *self.recovering.write().unwrap() = Some(email.clone());
        Ok(())
    }

    async fn update_password(&self, form: &PasswordResetForm) -> Result<(), AuthFailure> {
        self.check_forced()?;

        let email = self
            .recovering
            .write()
            .unwrap()
            .take()
            .ok_or_else(|| AuthFailure::rejected("Auth session missing!"))?;
        let mut accounts = self.accounts.write().unwrap();
        let account = accounts
            .get_mut(&email.as_str().to_ascii_lowercase())
            .ok_or_else(|| AuthFailure::rejected("User not found"))?;
        account.password = form.password().clone();
        Ok(())
    }
}
