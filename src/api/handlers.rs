//! API request handlers

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, error};

use crate::{
    error::Result,
    middleware::{InputValidator, Sanitizer},
    service::EmbeddingService,
    vector_db::SearchResult,
};

const EMBED_FAILURE: &str = "Failed to process embedding";
const SEARCH_FAILURE: &str = "Failed to search embeddings";

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<EmbeddingService>,
    pub sanitizer: Arc<Sanitizer>,
}

impl AppState {
    pub fn new(service: Arc<EmbeddingService>, sanitizer: Arc<Sanitizer>) -> Self {
        Self { service, sanitizer }
    }
}

/// Generic error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response from a search
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

fn bad_request(err: impl Display) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// 500 carrying the underlying message, or `fallback` if it has none
fn server_error(err: impl Display, fallback: &str) -> Response {
    let message = err.to_string();
    error!("Request failed: {}", message);

    let error = if message.is_empty() {
        fallback.to_string()
    } else {
        message
    };

    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { error })).into_response()
}

fn parse_body(body: &Bytes) -> std::result::Result<Value, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Embed a text and store it
pub async fn embed(State(state): State<AppState>, body: Bytes) -> Response {
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(e) => return server_error(e, EMBED_FAILURE),
    };

    let text = match InputValidator::validate_text(&body) {
        Ok(text) => text,
        Err(e) => return bad_request(e),
    };

    match process_embed(&state, text).await {
        Ok(()) => Json(json!({"success": true})).into_response(),
        Err(e) => server_error(e, EMBED_FAILURE),
    }
}

async fn process_embed(state: &AppState, text: &str) -> Result<()> {
    let text = state.sanitizer.sanitize(text)?;
    state.service.create_embedding(&text).await?;
    debug!("Embedding created");
    Ok(())
}

/// Search stored texts by similarity
pub async fn search(State(state): State<AppState>, body: Bytes) -> Response {
    let body = match parse_body(&body) {
        Ok(body) => body,
        Err(e) => return server_error(e, SEARCH_FAILURE),
    };

    let text = match InputValidator::validate_text(&body) {
        Ok(text) => text,
        Err(e) => return bad_request(e),
    };

    let limit = match InputValidator::validate_limit(&body) {
        Ok(limit) => limit,
        Err(e) => return bad_request(e),
    };

    match process_search(&state, text, limit).await {
        Ok(results) => Json(SearchResponse { results }).into_response(),
        Err(e) => server_error(e, SEARCH_FAILURE),
    }
}

async fn process_search(
    state: &AppState,
    text: &str,
    limit: Option<usize>,
) -> Result<Vec<SearchResult>> {
    let text = state.sanitizer.sanitize(text)?;
    state.service.search_similar(&text, limit).await
}

/// Liveness check; does not touch the collaborators
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_server_error_uses_fallback_for_empty_message() {
        let response = server_error("", EMBED_FAILURE);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({"error": "Failed to process embedding"}));
    }

    #[tokio::test]
    async fn test_server_error_keeps_message() {
        let response = server_error("Database error", SEARCH_FAILURE);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({"error": "Database error"}));
    }

    #[tokio::test]
    async fn test_health_timestamp_format() {
        let response = health().await.into_response();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(value["status"], "healthy");
        let timestamp = value["timestamp"].as_str().unwrap();
        assert!(timestamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
        // yyyy-mm-ddThh:mm:ss.mmmZ
        assert_eq!(timestamp.len(), 24);
    }
}
