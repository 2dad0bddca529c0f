//! Embedding Service - text embeddings with similarity search
//!
//! Accepts text, computes an embedding through an OpenAI-compatible
//! provider, persists it in Qdrant and ranks stored texts by similarity to a
//! query. The same operations are exposed over HTTP (`POST /embed`,
//! `POST /search`, `GET /health`) and on the command line.
//!
//! ## Features
//!
//! - **Rate Limiting**: fixed-window, per-client request counting
//! - **Input Sanitization**: markup stripping and length limits
//! - **Input Validation**: exact-message 400 responses for bad input
//! - **Layered Configuration**: defaults, TOML file, environment
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use embedding_service::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!
//!     let store = QdrantStore::new(config.vector_db.clone())?;
//!     store.ensure_collection().await?;
//!
//!     let service = EmbeddingService::new(
//!         Arc::new(OpenAiEmbeddingClient::new(config.embedding.clone())?),
//!         Arc::new(store),
//!     );
//!
//!     service.create_embedding("User prefers dark mode").await?;
//!     let results = service.search_similar("dark mode", Some(3)).await?;
//!     println!("{} matches", results.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod service;
pub mod shutdown;
pub mod vector_db;

pub use config::Config;
pub use error::{Result, ServiceError};
pub use service::EmbeddingService;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::api::{build_router, AppState};
    pub use crate::config::Config;
    pub use crate::embedding::{EmbeddingProvider, OpenAiEmbeddingClient};
    pub use crate::error::{Result, ServiceError};
    pub use crate::middleware::{InputValidator, RateLimitConfig, RateLimiter, Sanitizer};
    pub use crate::service::EmbeddingService;
    pub use crate::vector_db::{EmbeddingRecord, QdrantStore, SearchResult, VectorStore};
}
