//! HTTP middleware: security headers, CORS, rate limiting, JSON gate

use super::rate_limiter::RateLimiter;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

/// Bucket shared by every client that sends no identifying header
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Derive the rate limit key for a request: the first non-empty of
/// `x-forwarded-for`, then `x-real-ip`, else [`UNKNOWN_CLIENT`].
pub fn client_id(headers: &HeaderMap) -> String {
    ["x-forwarded-for", "x-real-ip"]
        .iter()
        .filter_map(|name| headers.get(*name))
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

/// Rate limiting middleware
pub async fn rate_limit_middleware(
    State(rate_limiter): State<Arc<RateLimiter>>,
    req: Request,
    next: Next,
) -> Response {
    let client_id = client_id(req.headers());
    let decision = rate_limiter.check(&client_id, Instant::now());

    if decision.allowed {
        return next.run(req).await;
    }

    let retry_after = decision.retry_after_secs.unwrap_or_default();
    warn!("Rejecting request from {}: retry after {}s", client_id, retry_after);

    (
        StatusCode::TOO_MANY_REQUESTS,
        [(header::RETRY_AFTER, retry_after.to_string())],
        Json(json!({
            "error": "Too many requests",
            "retryAfter": retry_after,
        })),
    )
        .into_response()
}

/// Add no-sniff and deny-framing headers to every response
pub async fn security_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    response
}

/// Reject POST requests whose body is not declared as JSON
pub async fn require_json(req: Request, next: Next) -> Response {
    if req.method() == Method::POST {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));

        if !is_json {
            warn!("Rejecting POST {} without JSON content type", req.uri().path());
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Content-Type must be application/json"})),
            )
                .into_response();
        }
    }

    next.run(req).await
}

/// Build the CORS layer: permissive unless explicit origins are configured
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
