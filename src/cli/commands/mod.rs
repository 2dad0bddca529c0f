//! CLI command implementations.

mod embed;
mod search;
mod serve;

pub use embed::run_embed;
pub use search::{parse_limit, run_search, DEFAULT_SEARCH_LIMIT};
pub use serve::run_serve;
