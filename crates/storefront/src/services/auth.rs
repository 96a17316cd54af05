//! Authentication service client.
//!
//! The storefront never checks credentials itself; it exchanges them with
//! the external token-issuing service (`POST login`, `POST register`) and
//! keeps the returned bearer token for the session. Failures surface once
//! to the caller, in the service's own wording where it has one.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::signup::ValidSignup;

/// Per-request timeout; clients are one-shot.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when talking to the authentication service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service rejected the credentials (401). The message is shown to
    /// the user verbatim.
    #[error("{message}")]
    InvalidCredentials { message: String },

    /// The service rejected the registration payload (422), per field.
    #[error("registration failed validation")]
    Validation {
        errors: HashMap<String, Vec<String>>,
    },

    /// Any other error response.
    #[error("auth service error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Role attached to an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    /// Gate for the admin dashboard.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// User payload from a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthenticatedUser {
    pub name: String,
    pub role: UserRole,
}

/// A live login: the bearer token plus the user it belongs to.
#[derive(Clone)]
pub struct AuthSession {
    token: SecretString,
    pub user: AuthenticatedUser,
}

impl AuthSession {
    /// Value for an `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: AuthenticatedUser,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Default, Deserialize)]
struct ValidationResponse {
    #[serde(default)]
    errors: HashMap<String, Vec<String>>,
}

/// Authentication service client.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// Create a client for the service at `base_url`
    /// (e.g. `http://localhost:8000/api`).
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: &Url) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
        })
    }

    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the service answers
    /// 401, [`AuthError::Api`] for other error responses.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthSession, AuthError> {
        let url = format!("{}/login", self.base_url);
        let body = serde_json::json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            let error: ErrorResponse = response.json().await.unwrap_or_default();
            tracing::warn!("login rejected");
            let message = if error.message.is_empty() {
                "Invalid credentials".to_owned()
            } else {
                error.message
            };
            return Err(AuthError::InvalidCredentials { message });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))?;

        tracing::info!(user = %login.user.name, "login succeeded");
        Ok(AuthSession {
            token: SecretString::from(login.token),
            user: login.user,
        })
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] when the service answers 422 with
    /// per-field messages, [`AuthError::Api`] for other error responses.
    pub async fn register(&self, signup: &ValidSignup) -> Result<(), AuthError> {
        let url = format!("{}/register", self.base_url);
        let body = serde_json::json!({
            "name": signup.name,
            "email": signup.email.as_str(),
            "password": signup.password.expose_secret(),
            "password_confirmation": signup.password.expose_secret(),
            "dateOfBirth": signup.date_of_birth,
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let validation: ValidationResponse = response.json().await.unwrap_or_default();
            tracing::warn!(fields = validation.errors.len(), "registration rejected");
            return Err(AuthError::Validation {
                errors: validation.errors,
            });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Api {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(email = %signup.email, "registration accepted");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_parses_wire_names() {
        let admin: UserRole = serde_json::from_str(r#""admin""#).unwrap();
        let user: UserRole = serde_json::from_str(r#""user""#).unwrap();
        assert!(admin.is_admin());
        assert!(!user.is_admin());
        assert!(serde_json::from_str::<UserRole>(r#""root""#).is_err());
    }

    #[test]
    fn test_login_response_shape() {
        let raw = r#"{
            "token": "1|abcdef",
            "user": {"name": "Priya Sharma", "role": "admin"}
        }"#;
        let login: LoginResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(login.user.name, "Priya Sharma");
        assert!(login.user.role.is_admin());
    }

    #[test]
    fn test_validation_response_collects_field_errors() {
        let raw = r#"{
            "message": "The email has already been taken.",
            "errors": {"email": ["The email has already been taken."]}
        }"#;
        let validation: ValidationResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(validation.errors["email"].len(), 1);
    }

    #[test]
    fn test_session_debug_redacts_token() {
        let session = AuthSession {
            token: SecretString::from("1|super_secret_token"),
            user: AuthenticatedUser {
                name: "Priya Sharma".to_owned(),
                role: UserRole::User,
            },
        };
        let debug_output = format!("{session:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token"));
    }

    #[test]
    fn test_bearer_header_value() {
        let session = AuthSession {
            token: SecretString::from("1|abcdef"),
            user: AuthenticatedUser {
                name: "Priya Sharma".to_owned(),
                role: UserRole::User,
            },
        };
        assert_eq!(session.bearer(), "Bearer 1|abcdef");
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let url = Url::parse("http://localhost:8000/api/").unwrap();
        let client = AuthClient::new(&url).unwrap();
        assert_eq!(client.base_url, "http://localhost:8000/api");
    }
}
