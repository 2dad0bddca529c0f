//! Search command implementation.

use crate::cli::{connect, Output, UsageError};
use crate::config::Config;
use anyhow::Result;

const USAGE: &str = "Usage: embedding-service search \"your search text\" [limit]";

/// Result count when no limit is given on the command line
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Parse the optional positional limit
pub fn parse_limit(limit: Option<&str>) -> Result<usize, UsageError> {
    match limit {
        None => Ok(DEFAULT_SEARCH_LIMIT),
        Some(raw) => raw
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|limit| *limit > 0)
            .ok_or_else(|| UsageError::new(format!("Invalid limit: {}", raw), USAGE)),
    }
}

/// Run the search command.
pub async fn run_search(text: Option<&str>, limit: Option<&str>, config: Config) -> Result<()> {
    let Some(text) = text.filter(|text| !text.is_empty()) else {
        return Err(UsageError::new("Please provide a text to search", USAGE).into());
    };
    let limit = parse_limit(limit)?;

    let service = connect(&config).await?;
    let results = service.search_similar(text, Some(limit)).await?;

    Output::search_header(text, results.len());
    for (index, result) in results.iter().enumerate() {
        Output::search_result(index + 1, &result.text, result.similarity);
    }

    Ok(())
}
