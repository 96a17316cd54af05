//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `NUTRIPLANNER_AUTH_URL` - Base URL of the authentication service (e.g., <http://localhost:8000/api>)
//!
//! ## Optional
//! - `NUTRIPLANNER_STATE_DIR` - Directory for the snapshot store (default: .nutriplanner/state)
//! - `NUTRIPLANNER_CATALOG_FILE` - Path to the static dish dataset JSON
//! - `NUTRIPLANNER_DISH_SERVICE_URL` - Base URL of the dish persistence service

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Authentication service base URL
    pub auth_url: Url,
    /// Directory backing the file snapshot store
    pub state_dir: PathBuf,
    /// Static dish dataset, when the catalog loads from a file
    pub catalog_file: Option<PathBuf>,
    /// Dish persistence service base URL, when the catalog loads remotely
    pub dish_service_url: Option<Url>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or any URL
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let auth_url = parse_url(
            "NUTRIPLANNER_AUTH_URL",
            &get_required_env("NUTRIPLANNER_AUTH_URL")?,
        )?;
        let state_dir = PathBuf::from(get_env_or_default(
            "NUTRIPLANNER_STATE_DIR",
            ".nutriplanner/state",
        ));
        let catalog_file = get_optional_env("NUTRIPLANNER_CATALOG_FILE").map(PathBuf::from);
        let dish_service_url = get_optional_env("NUTRIPLANNER_DISH_SERVICE_URL")
            .map(|raw| parse_url("NUTRIPLANNER_DISH_SERVICE_URL", &raw))
            .transpose()?;

        Ok(Self {
            auth_url,
            state_dir,
            catalog_file,
            dish_service_url,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a URL, rejecting anything that is not http(s).
fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_valid() {
        let url = parse_url("TEST_VAR", "http://localhost:8000/api").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api");
    }

    #[test]
    fn test_parse_url_https() {
        assert!(parse_url("TEST_VAR", "https://api.nutriplanner.test").is_ok());
    }

    #[test]
    fn test_parse_url_rejects_garbage() {
        let result = parse_url("TEST_VAR", "not a url");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_parse_url_rejects_non_http_scheme() {
        let result = parse_url("TEST_VAR", "ftp://localhost/api");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_missing_env_error_names_variable() {
        let err = get_required_env("NUTRIPLANNER_TEST_UNSET_VARIABLE").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing environment variable: NUTRIPLANNER_TEST_UNSET_VARIABLE"
        );
    }
}
