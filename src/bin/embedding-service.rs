//! Embedding service binary
//!
//! `serve` runs the HTTP API; `embed` and `search` are one-shot commands that
//! print their result to stdout.

use clap::Parser;
use embedding_service::{
    cli::{commands, Cli, Commands, Output, UsageError},
    config::Config,
    observability::init_observability,
};
use std::process::ExitCode;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            Output::error(&format!("Error: {}", e));
            return ExitCode::FAILURE;
        }
    };

    if let Some(level) = cli.log_level_override() {
        config.logging.level = level.to_string();
    }
    init_observability(&config.logging, config.server.is_production());

    let result = match cli.command {
        Commands::Serve => commands::run_serve(config).await,
        Commands::Embed { text } => commands::run_embed(text.as_deref(), config).await,
        Commands::Search { text, limit } => {
            commands::run_search(text.as_deref(), limit.as_deref(), config).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(usage) = e.downcast_ref::<UsageError>() {
                Output::error(&format!("Error: {}", usage));
                Output::warning(usage.usage);
            } else {
                error!("Command failed: {:#}", e);
                Output::error(&format!("Error: {}", e));
            }
            ExitCode::FAILURE
        }
    }
}
