//! Wire models for the OpenAI-compatible embeddings endpoint

use serde::{Deserialize, Serialize};

/// Request to generate an embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// Model name
    pub model: String,

    /// Input text
    pub input: String,
}

/// Response from embedding generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// Generated embeddings
    pub data: Vec<EmbeddingData>,
}

/// Individual embedding data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingData {
    /// Embedding vector
    pub embedding: Vec<f32>,
}

impl EmbeddingRequest {
    pub fn new(model: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input: input.into(),
        }
    }
}

impl EmbeddingResponse {
    /// The first embedding in the response, if any
    pub fn into_first(self) -> Option<Vec<f32>> {
        self.data.into_iter().next().map(|data| data.embedding)
    }
}
