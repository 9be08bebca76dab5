//! Credential forms: sign-up, login, password reset.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Syntactically valid email address.
///
/// Accepts `local@domain.tld` shapes: no whitespace, exactly one `@`, and a
/// dot inside the domain with characters on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validates and wraps an email address. Surrounding whitespace is trimmed.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = raw.as_ref().trim();
        if value.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !Self::is_well_formed(value) {
            return Err(ValidationError::invalid_format(
                "email",
                "Please enter a valid email address",
            ));
        }
        Ok(Self(value.to_string()))
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_well_formed(value: &str) -> bool {
        if value.chars().any(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.contains('@') {
            return false;
        }
        domain
            .char_indices()
            .filter(|(_, c)| *c == '.')
            .any(|(i, _)| i > 0 && i + 1 < domain.len())
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        EmailAddress::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn validate_password(field: &str, password: &SecretString) -> Result<(), ValidationError> {
    let exposed = password.expose_secret();
    if exposed.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if exposed.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::too_short(field, MIN_PASSWORD_LENGTH));
    }
    Ok(())
}

/// A complete, valid sign-up form.
#[derive(Debug, Clone)]
pub struct SignUpForm {
    first_name: String,
    email: EmailAddress,
    password: SecretString,
}

impl SignUpForm {
    /// Validates the form. The first failing field is reported.
    pub fn new(
        first_name: impl Into<String>,
        email: impl AsRef<str>,
        password: SecretString,
    ) -> Result<Self, ValidationError> {
        let first_name = first_name.into().trim().to_string();
        if first_name.is_empty() {
            return Err(ValidationError::empty_field("first_name"));
        }
        let email = EmailAddress::new(email)?;
        validate_password("password", &password)?;
        Ok(Self {
            first_name,
            email,
            password,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }
}

/// A complete, valid login form.
#[derive(Debug, Clone)]
pub struct LoginForm {
    email: EmailAddress,
    password: SecretString,
}

impl LoginForm {
    /// Validates the form. The first failing field is reported.
    pub fn new(email: impl AsRef<str>, password: SecretString) -> Result<Self, ValidationError> {
        let email = EmailAddress::new(email)?;
        validate_password("password", &password)?;
        Ok(Self { email, password })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }
}

/// New password plus its confirmation.
#[derive(Debug, Clone)]
pub struct PasswordResetForm {
    password: SecretString,
}

impl PasswordResetForm {
    /// Validates the new password and that the confirmation matches it.
    pub fn new(password: SecretString, confirmation: SecretString) -> Result<Self, ValidationError> {
        validate_password("password", &password)?;
        if confirmation.expose_secret().is_empty() {
            return Err(ValidationError::empty_field("confirm_password"));
        }
        if password.expose_secret() != confirmation.expose_secret() {
            return Err(ValidationError::invalid_format(
                "confirm_password",
                "Passwords do not match",
            ));
        }
        Ok(Self { password })
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }
}
