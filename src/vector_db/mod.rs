//! Vector datastore integration with Qdrant

pub mod client;
pub mod models;

pub use client::QdrantStore;
pub use models::{EmbeddingRecord, SearchResult};

use async_trait::async_trait;
use crate::error::Result;

/// Capability: persist embeddings and search them by similarity
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Persist a text together with its embedding
    async fn save_embedding(&self, text: &str, embedding: &[f32]) -> Result<()>;

    /// Fetch a stored embedding by identifier
    async fn get_embedding(&self, id: &str) -> Result<Vec<f32>>;

    /// Rank stored texts by similarity to `embedding`.
    ///
    /// `None` lets the store apply its own default result count. Ordering,
    /// including ties, is defined by the store.
    async fn search_similar(
        &self,
        embedding: &[f32],
        limit: Option<usize>,
    ) -> Result<Vec<SearchResult>>;
}
