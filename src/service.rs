//! Embedding orchestration over the provider and datastore ports

use crate::embedding::EmbeddingProvider;
use crate::error::{Result, ServiceError};
use crate::vector_db::{EmbeddingRecord, SearchResult, VectorStore};
use std::sync::Arc;
use tracing::debug;

/// Coordinates embedding generation and persistence.
///
/// Every operation is a short sequential chain of collaborator calls.
/// Failures abort the operation and surface unchanged; nothing is retried
/// or cached.
#[derive(Clone)]
pub struct EmbeddingService {
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
}

impl EmbeddingService {
    pub fn new(
        embedding_provider: Arc<dyn EmbeddingProvider>,
        vector_store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            embedding_provider,
            vector_store,
        }
    }

    /// Embed `text` and persist the pair. Returns only after the store
    /// accepted the record.
    pub async fn create_embedding(&self, text: &str) -> Result<EmbeddingRecord> {
        let embedding = self.embedding_provider.embed(text).await?;
        if embedding.is_empty() {
            return Err(ServiceError::EmbeddingGenerationFailed);
        }

        self.vector_store.save_embedding(text, &embedding).await?;
        debug!("Stored embedding with {} dimensions", embedding.len());

        Ok(EmbeddingRecord {
            text: text.to_string(),
            embedding,
        })
    }

    /// Fetch a stored embedding by identifier
    pub async fn get_embedding(&self, id: &str) -> Result<Vec<f32>> {
        self.vector_store.get_embedding(id).await
    }

    /// Rank stored texts by similarity to `text`, in the store's order
    pub async fn search_similar(
        &self,
        text: &str,
        limit: Option<usize>,
    ) -> Result<Vec<SearchResult>> {
        let embedding = self.embedding_provider.embed(text).await?;
        let results = self.vector_store.search_similar(&embedding, limit).await?;
        debug!("Search returned {} results", results.len());
        Ok(results)
    }
}
