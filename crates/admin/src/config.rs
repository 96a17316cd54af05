//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `NUTRIPLANNER_STATE_DIR` - Snapshot store directory, shared with the
//!   storefront (default: .nutriplanner/state)
//! - `NUTRIPLANNER_SEED_FILE` - Dish dataset used to seed an empty dish book

use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
///
/// The dashboard reads the same snapshot namespace the storefront writes,
/// so `state_dir` must point both halves at the same directory.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Directory backing the file snapshot store
    pub state_dir: PathBuf,
    /// Dish dataset used to seed an empty dish book
    pub seed_file: Option<PathBuf>,
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Currently infallible; the signature matches the other config
    /// loaders.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let state_dir = PathBuf::from(get_env_or_default(
            "NUTRIPLANNER_STATE_DIR",
            ".nutriplanner/state",
        ));
        let seed_file = get_optional_env("NUTRIPLANNER_SEED_FILE").map(PathBuf::from);

        Ok(Self {
            state_dir,
            seed_file,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
