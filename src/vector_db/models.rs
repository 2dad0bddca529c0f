//! Data models for stored embeddings and search results

use serde::{Deserialize, Serialize};

/// A text paired with its embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub text: String,
    pub embedding: Vec<f32>,
}

/// A stored text ranked against a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Point identifier, when the store provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub text: String,

    /// Similarity score, conventionally in [0, 1]
    pub similarity: f32,
}

impl SearchResult {
    pub fn new(text: impl Into<String>, similarity: f32) -> Self {
        Self {
            id: None,
            text: text.into(),
            similarity,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}
