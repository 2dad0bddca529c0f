//! Embedding generation via an external provider

pub mod client;
pub mod models;

pub use client::OpenAiEmbeddingClient;
pub use models::{EmbeddingRequest, EmbeddingResponse};

use async_trait::async_trait;
use crate::error::Result;

/// Capability: turn text into an embedding vector.
///
/// Dimensionality is whatever the provider returns; it is not checked here.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate the embedding for one text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}
