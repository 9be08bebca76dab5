//! Events pushed by the identity provider.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the user authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    Email,
    Google,
}

impl fmt::Display for AuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthProvider::Email => write!(f, "email"),
            AuthProvider::Google => write!(f, "google"),
        }
    }
}

/// Asynchronous notification from the identity provider.
///
/// These can arrive on any screen; the controller decides whether each one
/// applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum IdentityEvent {
    /// The user followed a password recovery link.
    PasswordRecoveryRequested,
    /// A sign-in completed. `is_new_account` is decided by the provider.
    #[serde(rename_all = "camelCase")]
    SignedIn {
        provider: AuthProvider,
        is_new_account: bool,
    },
}

impl IdentityEvent {
    pub fn name(&self) -> &'static str {
        match self {
            IdentityEvent::PasswordRecoveryRequested => "passwordRecovery",
            IdentityEvent::SignedIn { .. } => "signedIn",
        }
    }
}
