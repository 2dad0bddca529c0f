//! Serve command: run the HTTP API.

use crate::api::{build_router, AppState};
use crate::cli::connect;
use crate::config::Config;
use crate::middleware::{RateLimiter, Sanitizer};
use crate::shutdown::shutdown_signal;
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// Run the HTTP API server until Ctrl+C or SIGTERM.
pub async fn run_serve(config: Config) -> Result<()> {
    info!("Starting embedding service ({})", config.server.environment);

    let service = Arc::new(connect(&config).await?);
    info!("Collaborators initialized (collection: {})", config.vector_db.collection);

    let sanitizer = Arc::new(Sanitizer::new(config.sanitizer.max_text_length));
    let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit.to_rate_limit_config()));
    info!(
        "Rate limiter: {} requests per {}s",
        config.rate_limit.max_requests, config.rate_limit.window_secs
    );

    let app = build_router(
        AppState::new(service, sanitizer),
        rate_limiter,
        &config.server.allowed_origins(),
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
