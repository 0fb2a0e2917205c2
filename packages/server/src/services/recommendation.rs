use std::time::Duration;

use axum::body::Bytes;
use thiserror::Error;

use crate::config::RecommendationConfig;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("recommendation service answered {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Forwards ingredient lists to the recommendation service.
#[derive(Clone)]
pub struct RecommendationClient {
    http: reqwest::Client,
    url: String,
}

impl RecommendationClient {
    pub fn new(config: &RecommendationConfig) -> Result<Self, RelayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            url: config.url.clone(),
        })
    }

    /// POST the ingredient names as a JSON list and return the response body untouched.
    pub async fn recommend(&self, ingredients: &[String]) -> Result<Bytes, RelayError> {
        let response = self.http.post(&self.url).json(ingredients).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Status { status, body });
        }

        Ok(response.bytes().await?)
    }
}
