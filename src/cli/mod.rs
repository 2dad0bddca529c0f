//! Command-line interface

pub mod commands;
mod output;

pub use output::Output;

use crate::config::Config;
use crate::embedding::OpenAiEmbeddingClient;
use crate::service::EmbeddingService;
use crate::vector_db::QdrantStore;
use clap::{Parser, Subcommand};
use std::sync::Arc;

/// Embedding service
///
/// Embed texts with an OpenAI-compatible provider, store them in Qdrant and
/// search them by similarity, over HTTP or from the command line.
#[derive(Parser, Debug)]
#[command(name = "embedding-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve,

    /// Embed a text, store it and print the result as JSON
    Embed {
        /// Text to embed
        text: Option<String>,
    },

    /// Search stored texts by similarity
    Search {
        /// Text to search for
        text: Option<String>,

        /// Maximum number of results (default: 5)
        limit: Option<String>,
    },
}

impl Cli {
    /// Log level implied by `-v` flags, if any
    pub fn log_level_override(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("debug"),
            _ => Some("trace"),
        }
    }
}

/// Bad command-line input; reported with a usage line
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct UsageError {
    pub message: String,
    pub usage: &'static str,
}

impl UsageError {
    pub fn new(message: impl Into<String>, usage: &'static str) -> Self {
        Self {
            message: message.into(),
            usage,
        }
    }
}

/// Build the orchestrator over the configured provider and datastore,
/// creating the collection if needed
pub async fn connect(config: &Config) -> anyhow::Result<EmbeddingService> {
    let embedding_client = OpenAiEmbeddingClient::new(config.embedding.clone())?;

    let store = QdrantStore::new(config.vector_db.clone())?;
    store.ensure_collection().await?;

    Ok(EmbeddingService::new(
        Arc::new(embedding_client),
        Arc::new(store),
    ))
}
