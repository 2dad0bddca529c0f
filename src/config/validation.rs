//! Configuration validation

use super::*;
use crate::error::{Result, ServiceError};
use crate::middleware::MAX_WINDOW;

/// Validate complete configuration.
///
/// Missing credentials are reported together, by the environment variable
/// that supplies them.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_required(config)?;
    validate_embedding_config(&config.embedding)?;
    validate_vector_db_config(&config.vector_db)?;
    validate_server_config(&config.server)?;
    validate_rate_limit_settings(&config.rate_limit)?;
    validate_logging_config(&config.logging)?;

    if config.sanitizer.max_text_length == 0 {
        return Err(ServiceError::Config(
            "Sanitizer max text length must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

fn validate_required(config: &Config) -> Result<()> {
    let mut missing = Vec::new();

    if !secret_is_set(&config.embedding.api_key) {
        missing.push("OPENAI_API_KEY");
    }
    if config.vector_db.url.trim().is_empty() {
        missing.push("QDRANT_URL");
    }
    if !secret_is_set(&config.vector_db.api_key) {
        missing.push("QDRANT_API_KEY");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Config(format!(
            "Missing required environment variables: {}",
            missing.join(", ")
        )))
    }
}

fn validate_url(url: &str, what: &str) -> Result<()> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ServiceError::Config(format!(
            "{} must start with http:// or https://",
            what
        )));
    }
    Ok(())
}

/// Validate embedding configuration
fn validate_embedding_config(config: &EmbeddingConfig) -> Result<()> {
    validate_url(&config.api_url, "Embedding API URL")?;

    if config.model.trim().is_empty() {
        return Err(ServiceError::Config("Embedding model cannot be empty".to_string()));
    }

    if config.timeout_secs == 0 || config.timeout_secs > 300 {
        return Err(ServiceError::Config(
            "Embedding timeout must be between 1 and 300 seconds".to_string(),
        ));
    }

    Ok(())
}

/// Validate vector database configuration
fn validate_vector_db_config(config: &VectorDbConfig) -> Result<()> {
    validate_url(&config.url, "Qdrant URL")?;

    if config.collection.is_empty() {
        return Err(ServiceError::Config("Collection name cannot be empty".to_string()));
    }

    if config.vector_size == 0 || config.vector_size > 65_536 {
        return Err(ServiceError::Config(
            "Vector size must be between 1 and 65536".to_string(),
        ));
    }

    if !(0.0..=1.0).contains(&config.match_threshold) {
        return Err(ServiceError::Config(
            "Match threshold must be between 0.0 and 1.0".to_string(),
        ));
    }

    if config.match_count == 0 {
        return Err(ServiceError::Config(
            "Default match count must be greater than 0".to_string(),
        ));
    }

    if config.timeout_secs == 0 || config.timeout_secs > 300 {
        return Err(ServiceError::Config(
            "Database timeout must be between 1 and 300 seconds".to_string(),
        ));
    }

    Ok(())
}

/// Validate server configuration
pub fn validate_server_config(config: &ServerConfig) -> Result<()> {
    if config.port == 0 {
        return Err(ServiceError::Config("Server port cannot be 0".to_string()));
    }

    if config.host.is_empty() {
        return Err(ServiceError::Config("Server host cannot be empty".to_string()));
    }

    Ok(())
}

fn validate_rate_limit_settings(config: &RateLimitSettings) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    if config.max_requests == 0 {
        return Err(ServiceError::Config(
            "Rate limit requests must be greater than 0".to_string(),
        ));
    }

    let max_window = MAX_WINDOW.as_secs();
    if config.window_secs == 0 || config.window_secs > max_window {
        return Err(ServiceError::Config(format!(
            "Rate limit window must be between 1 and {} seconds",
            max_window
        )));
    }

    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    match config.format.as_deref() {
        None | Some("json") | Some("compact") | Some("pretty") => Ok(()),
        Some(other) => Err(ServiceError::Config(format!(
            "Unknown log format '{}' (expected json, compact or pretty)",
            other
        ))),
    }
}
