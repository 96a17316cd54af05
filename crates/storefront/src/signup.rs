//! Signup form validation.
//!
//! Mirrors the registration contract of the authentication service: name,
//! email, password with confirmation, date of birth, and a captcha answer.
//! Validation is local and collects every field failure in one pass, so the
//! form can mark all offending fields at once; nothing here touches the
//! network.

use chrono::NaiveDate;
use nutriplanner_core::{Email, EmailError};
use secrecy::SecretString;
use thiserror::Error;

use crate::captcha::Captcha;

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupError {
    #[error("name is required")]
    NameRequired,
    #[error(transparent)]
    Email(#[from] EmailError),
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("date of birth must be YYYY-MM-DD")]
    InvalidDateOfBirth,
    #[error("captcha answer is wrong")]
    CaptchaFailed,
}

/// Raw signup form input, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    /// `YYYY-MM-DD`.
    pub date_of_birth: String,
    pub captcha_answer: String,
}

/// A validated signup, ready for the registration call.
#[derive(Debug, Clone)]
pub struct ValidSignup {
    pub name: String,
    pub email: Email,
    pub password: SecretString,
    pub date_of_birth: NaiveDate,
}

impl SignupForm {
    /// Minimum password length the service accepts.
    pub const MIN_PASSWORD_LENGTH: usize = 8;

    /// Validate the form against `captcha`.
    ///
    /// # Errors
    ///
    /// Returns every field failure found, not just the first.
    pub fn validate(&self, captcha: &Captcha) -> Result<ValidSignup, Vec<SignupError>> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(SignupError::NameRequired);
        }

        let email = match Email::parse(self.email.trim()) {
            Ok(email) => Some(email),
            Err(e) => {
                errors.push(SignupError::Email(e));
                None
            }
        };

        if self.password.chars().count() < Self::MIN_PASSWORD_LENGTH {
            errors.push(SignupError::PasswordTooShort {
                min: Self::MIN_PASSWORD_LENGTH,
            });
        }
        if self.password != self.password_confirmation {
            errors.push(SignupError::PasswordMismatch);
        }

        let date_of_birth = match NaiveDate::parse_from_str(self.date_of_birth.trim(), "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(SignupError::InvalidDateOfBirth);
                None
            }
        };

        if !captcha.verify(&self.captcha_answer) {
            errors.push(SignupError::CaptchaFailed);
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        match (email, date_of_birth) {
            (Some(email), Some(date_of_birth)) => Ok(ValidSignup {
                name: name.to_owned(),
                email,
                password: SecretString::from(self.password.clone()),
                date_of_birth,
            }),
            // Unreachable: a missing part always pushed an error above.
            _ => Err(errors),
        }
    }
}
