//! Configuration loader with environment variable support

use super::Config;
use crate::error::Result;
use config::{Environment, File};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Prefix for nested overrides, e.g. `EMBEDDING_SERVICE__RATE_LIMIT__MAX_REQUESTS`
pub const ENV_PREFIX: &str = "EMBEDDING_SERVICE";

/// Flat environment variables and the configuration keys they set
pub const WELL_KNOWN_VARS: &[(&str, &str)] = &[
    ("OPENAI_API_KEY", "embedding.api_key"),
    ("QDRANT_URL", "vector_db.url"),
    ("QDRANT_API_KEY", "vector_db.api_key"),
    ("ALLOWED_ORIGINS", "server.allowed_origins"),
    ("PORT", "server.port"),
    ("APP_ENV", "server.environment"),
    ("LOG_LEVEL", "logging.level"),
    ("LOG_FORMAT", "logging.format"),
];

/// Load configuration from `.env`, `CONFIG_PATH` (default `config.toml`)
/// and the process environment
pub fn load_config() -> Result<Config> {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded environment from {}", path.display());
    }

    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let vars: HashMap<String, String> = std::env::vars().collect();
    load_config_with(Path::new(&path), &vars)
}

/// Load configuration from an optional TOML file and an explicit set of
/// environment variables.
///
/// Precedence, lowest first: defaults, file, prefixed overrides, the flat
/// variables in [`WELL_KNOWN_VARS`].
pub fn load_config_with(path: &Path, vars: &HashMap<String, String>) -> Result<Config> {
    let mut builder = config::Config::builder()
        .add_source(File::from(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .source(Some(vars.clone())),
        );

    for (var, key) in WELL_KNOWN_VARS {
        let value = vars.get(*var).filter(|value| !value.is_empty()).cloned();
        builder = builder.set_override_option(*key, value)?;
    }

    let config: Config = builder.build()?.try_deserialize()?;
    debug!("Configuration loaded (file: {})", path.display());
    Ok(config)
}
