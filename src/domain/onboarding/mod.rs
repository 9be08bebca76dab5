//! Onboarding module - inputs that gate a `continue` before the vitals step.
//!
//! Forms validate on construction, so holding a `SignUpForm` or
//! `Demographics` value means the screen's continue action may fire.
//! Device pairing only accepts devices from the advertised catalog.

mod credentials;
mod demographics;
mod device;

pub use credentials::{EmailAddress, LoginForm, PasswordResetForm, SignUpForm, MIN_PASSWORD_LENGTH};
pub use demographics::{Demographics, Gender, WeightUnit};
pub use device::{Device, DeviceId};
