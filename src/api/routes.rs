//! API route configuration

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::{
    rate_limiter::RateLimiter,
    security::{cors_layer, rate_limit_middleware, require_json, security_headers},
};

use super::handlers::{self, AppState};

/// Build the complete API router with middleware.
///
/// Every route gets request tracing, security headers, CORS and rate
/// limiting; the POST routes additionally require a JSON content type.
pub fn build_router(
    app_state: AppState,
    rate_limiter: Arc<RateLimiter>,
    allowed_origins: &[String],
) -> Router {
    let api_routes = Router::new()
        .route("/embed", post(handlers::embed))
        .route("/search", post(handlers::search))
        .route_layer(from_fn(require_json));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(api_routes)
        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn(security_headers))
                .layer(cors_layer(allowed_origins))
                .layer(from_fn_with_state(rate_limiter, rate_limit_middleware)),
        )
}
