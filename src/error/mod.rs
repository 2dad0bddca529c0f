//! Error types for the embedding service

use thiserror::Error;

/// Result type alias for embedding service operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Main error type for the embedding service.
///
/// Collaborator failures are wrapped transparently: the message a client
/// or CLI user sees is the one produced by the failing collaborator.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    VectorDb(#[from] VectorDbError),

    #[error(transparent)]
    Sanitize(#[from] crate::middleware::SanitizeError),

    #[error("Failed to create embedding")]
    EmbeddingGenerationFailed,

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors raised by the embedding provider
#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Embedding provider rate limit or quota exceeded")]
    RateLimitExceeded,

    #[error("Embedding provider authentication failed")]
    AuthenticationFailed,
}

/// Errors raised by the vector datastore
#[derive(Error, Debug)]
pub enum VectorDbError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Collection error: {0}")]
    CollectionError(String),

    #[error("Insert error: {0}")]
    InsertError(String),

    #[error("Search error: {0}")]
    SearchError(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid ID format: {0}")]
    InvalidIdFormat(String),
}

impl From<config::ConfigError> for ServiceError {
    fn from(err: config::ConfigError) -> Self {
        ServiceError::Config(err.to_string())
    }
}
