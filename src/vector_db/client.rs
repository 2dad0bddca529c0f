//! Qdrant client implementation

use super::models::SearchResult;
use super::VectorStore;
use crate::config::VectorDbConfig;
use crate::error::{Result, VectorDbError};
use async_trait::async_trait;
use chrono::Utc;
use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::vectors_config::Config;
use qdrant_client::qdrant::vectors_output::VectorsOptions;
use qdrant_client::qdrant::with_payload_selector::SelectorOptions;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, GetPointsBuilder, PointId, PointStruct, SearchPoints,
    UpsertPointsBuilder, Value, VectorParamsBuilder, VectorsConfig, VectorsOutput,
    WithPayloadSelector,
};
use qdrant_client::Qdrant;
use secrecy::ExposeSecret;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

const TEXT_FIELD: &str = "text";
const CREATED_AT_FIELD: &str = "created_at";

/// Datastore backed by a single Qdrant collection
pub struct QdrantStore {
    config: VectorDbConfig,
    client: Qdrant,
}

impl QdrantStore {
    /// Create a new Qdrant-backed store
    pub fn new(config: VectorDbConfig) -> Result<Self> {
        info!("Connecting to Qdrant at {}", config.url);

        let api_key = Some(config.api_key.expose_secret().clone()).filter(|key| !key.is_empty());

        let client = Qdrant::from_url(&config.url)
            .api_key(api_key)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| VectorDbError::ConnectionError(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Name of the collection holding the embeddings
    pub fn collection(&self) -> &str {
        &self.config.collection
    }

    /// Create the collection if it does not exist yet
    pub async fn ensure_collection(&self) -> Result<()> {
        let name = self.config.collection.as_str();

        let exists = self
            .client
            .collection_exists(name)
            .await
            .map_err(|e| VectorDbError::ConnectionError(e.to_string()))?;

        if exists {
            debug!("Collection already exists: {}", name);
            return Ok(());
        }

        info!("Creating collection: {}", name);
        let vector_params =
            VectorParamsBuilder::new(self.config.vector_size as u64, Distance::Cosine).build();

        self.client
            .create_collection(CreateCollectionBuilder::new(name).vectors_config(VectorsConfig {
                config: Some(Config::Params(vector_params)),
            }))
            .await
            .map_err(|e| VectorDbError::CollectionError(e.to_string()))?;

        Ok(())
    }

    /// Delete the collection and everything in it
    pub async fn drop_collection(&self) -> Result<()> {
        self.client
            .delete_collection(self.config.collection.as_str())
            .await
            .map_err(|e| VectorDbError::CollectionError(e.to_string()))?;

        info!("Collection deleted: {}", self.config.collection);
        Ok(())
    }
}

/// Build the payload stored next to each vector
fn build_payload(text: &str) -> HashMap<String, Value> {
    let mut payload = HashMap::new();
    payload.insert(TEXT_FIELD.to_string(), Value::from(text.to_string()));
    payload.insert(CREATED_AT_FIELD.to_string(), Value::from(Utc::now().to_rfc3339()));
    payload
}

/// Extract the stored text from a point payload
fn payload_text(payload: &HashMap<String, Value>) -> Option<String> {
    payload
        .get(TEXT_FIELD)
        .and_then(|v| v.kind.as_ref())
        .and_then(|kind| match kind {
            Kind::StringValue(s) => Some(s.clone()),
            _ => None,
        })
}

/// Render a point id as a string
fn point_id_string(id: Option<PointId>) -> Option<String> {
    id.and_then(|id| id.point_id_options).map(|options| match options {
        PointIdOptions::Num(num) => num.to_string(),
        PointIdOptions::Uuid(uuid) => uuid,
    })
}

/// Extract a dense vector from a retrieved point
fn dense_vector(vectors: Option<VectorsOutput>) -> Option<Vec<f32>> {
    vectors.and_then(|v| match v.vectors_options {
        Some(VectorsOptions::Vector(vector)) => Some(vector.data),
        _ => None,
    })
}

#[async_trait]
impl VectorStore for QdrantStore {
    async fn save_embedding(&self, text: &str, embedding: &[f32]) -> Result<()> {
        let id = Uuid::new_v4();
        debug!("Saving embedding {} into collection: {}", id, self.config.collection);

        let point = PointStruct::new(id.to_string(), embedding.to_vec(), build_payload(text));

        self.client
            .upsert_points(
                UpsertPointsBuilder::new(self.config.collection.clone(), vec![point]).wait(true),
            )
            .await
            .map_err(|e| VectorDbError::InsertError(e.to_string()))?;

        debug!("Embedding saved");
        Ok(())
    }

    async fn get_embedding(&self, id: &str) -> Result<Vec<f32>> {
        let uuid = Uuid::parse_str(id).map_err(|e| VectorDbError::InvalidIdFormat(e.to_string()))?;
        debug!("Getting embedding {} from collection: {}", uuid, self.config.collection);

        let response = self
            .client
            .get_points(
                GetPointsBuilder::new(
                    self.config.collection.clone(),
                    vec![PointId::from(uuid.to_string())],
                )
                .with_payload(false)
                .with_vectors(true),
            )
            .await
            .map_err(|e| VectorDbError::SearchError(e.to_string()))?;

        let point = response
            .result
            .into_iter()
            .next()
            .ok_or_else(|| VectorDbError::NotFound("Embedding not found".to_string()))?;

        let vector = dense_vector(point.vectors)
            .ok_or_else(|| VectorDbError::NotFound("Embedding not found".to_string()))?;

        Ok(vector)
    }

    async fn search_similar(
        &self,
        embedding: &[f32],
        limit: Option<usize>,
    ) -> Result<Vec<SearchResult>> {
        let limit = limit.unwrap_or(self.config.match_count);
        debug!(
            "Searching collection: {} with limit: {}",
            self.config.collection, limit
        );

        let search = SearchPoints {
            collection_name: self.config.collection.clone(),
            vector: embedding.to_vec(),
            limit: limit as u64,
            with_payload: Some(WithPayloadSelector {
                selector_options: Some(SelectorOptions::Enable(true)),
            }),
            score_threshold: Some(self.config.match_threshold),
            ..Default::default()
        };

        let response = self
            .client
            .search_points(search)
            .await
            .map_err(|e| VectorDbError::SearchError(e.to_string()))?;

        let results = response
            .result
            .into_iter()
            .map(|point| -> Result<SearchResult> {
                let text = payload_text(&point.payload)
                    .ok_or_else(|| VectorDbError::SearchError("Missing text field".to_string()))?;

                Ok(SearchResult {
                    id: point_id_string(point.id),
                    text,
                    similarity: point.score,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Found {} results", results.len());
        Ok(results)
    }
}
