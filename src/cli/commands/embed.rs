//! Embed command implementation.

use crate::cli::{connect, UsageError};
use crate::config::Config;
use anyhow::Result;
use tracing::debug;

const USAGE: &str = "Usage: embedding-service embed \"your text here\"";

/// Run the embed command.
///
/// The text is passed to the service as given, without sanitization.
pub async fn run_embed(text: Option<&str>, config: Config) -> Result<()> {
    let Some(text) = text.filter(|text| !text.is_empty()) else {
        return Err(UsageError::new("Please provide a text to embed", USAGE).into());
    };

    let service = connect(&config).await?;
    let record = service.create_embedding(text).await?;
    debug!("Embedding created with {} dimensions", record.embedding.len());

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
