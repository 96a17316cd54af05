//! Dish persistence service client.
//!
//! Read access to the canonical dish collection (`GET meals`). The service
//! speaks the loose legacy shape, so every record goes through the same
//! normalization as the file-backed catalog; records that fail it are
//! logged and skipped rather than failing the fetch.

use std::time::Duration;

use nutriplanner_core::{Dish, RawDish};
use thiserror::Error;
use url::Url;

/// Per-request timeout; clients are one-shot.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when talking to the dish service.
#[derive(Debug, Error)]
pub enum DishServiceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("dish service error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Dish persistence service client.
#[derive(Debug, Clone)]
pub struct DishServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl DishServiceClient {
    /// Create a client for the service at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: &Url) -> Result<Self, DishServiceError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.as_str().trim_end_matches('/').to_owned(),
        })
    }

    /// Fetch and normalize the full dish collection.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body is not a JSON array;
    /// individual malformed records are skipped, not fatal.
    pub async fn fetch_dishes(&self) -> Result<Vec<Dish>, DishServiceError> {
        let url = format!("{}/meals", self.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DishServiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let records: Vec<RawDish> = response
            .json()
            .await
            .map_err(|e| DishServiceError::Parse(e.to_string()))?;

        let mut dishes = Vec::with_capacity(records.len());
        for record in records {
            match record.normalize() {
                Ok(dish) => dishes.push(dish),
                Err(error) => tracing::warn!(%error, "skipping malformed dish record"),
            }
        }

        tracing::info!(count = dishes.len(), "dish collection fetched");
        Ok(dishes)
    }
}
