//! Embedding client for OpenAI-compatible APIs

use super::{models::*, EmbeddingProvider};
use crate::config::EmbeddingConfig;
use crate::error::{EmbeddingError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Client for generating embeddings via an OpenAI-compatible API
pub struct OpenAiEmbeddingClient {
    config: EmbeddingConfig,
    http_client: Client,
}

impl OpenAiEmbeddingClient {
    /// Create a new embedding client
    pub fn new(config: EmbeddingConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(EmbeddingError::NetworkError)?;

        info!("Initialized embedding client for model {}", config.model);

        Ok(Self {
            config,
            http_client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/embeddings", self.config.api_url.trim_end_matches('/'))
    }

    /// Make a single API request. Failures are not retried.
    async fn request(&self, request: &EmbeddingRequest) -> Result<EmbeddingResponse> {
        debug!("Making embedding API request");

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(EmbeddingError::NetworkError)?;

        let status = response.status();

        match status {
            StatusCode::OK => {
                let embedding_response: EmbeddingResponse = response
                    .json()
                    .await
                    .map_err(EmbeddingError::NetworkError)?;

                debug!("Received {} embeddings", embedding_response.data.len());
                Ok(embedding_response)
            }
            StatusCode::UNAUTHORIZED => {
                error!("Embedding provider authentication failed");
                Err(EmbeddingError::AuthenticationFailed.into())
            }
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("Embedding provider rate limit exceeded");
                Err(EmbeddingError::RateLimitExceeded.into())
            }
            _ => {
                let error_text = response.text().await.unwrap_or_default();
                error!("Embedding request failed with status {}: {}", status, error_text);
                Err(EmbeddingError::ApiError(format!("Status {}: {}", status, error_text)).into())
            }
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingRequest::new(self.config.model.clone(), text);
        let response = self.request(&request).await?;

        // An empty `data` array yields an empty vector; callers decide
        // whether that is a failure.
        Ok(response.into_first().unwrap_or_default())
    }
}
