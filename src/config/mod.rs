//! Configuration management for the embedding service

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

pub mod loader;
pub mod validation;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub embedding: EmbeddingConfig,
    pub vector_db: VectorDbConfig,
    pub server: ServerConfig,
    pub rate_limit: RateLimitSettings,
    pub sanitizer: SanitizerConfig,
    pub logging: LoggingConfig,
}

/// Configuration for the embedding provider
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Base URL of an OpenAI-compatible API
    pub api_url: String,

    /// API key (secured)
    #[serde(deserialize_with = "deserialize_secret")]
    pub api_key: Secret<String>,

    /// Embedding model name
    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Configuration for the Qdrant datastore
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VectorDbConfig {
    /// Qdrant server URL
    pub url: String,

    /// API key (secured)
    #[serde(deserialize_with = "deserialize_secret")]
    pub api_key: Secret<String>,

    /// Collection holding the embeddings
    pub collection: String,

    /// Vector dimension used when creating the collection
    pub vector_size: usize,

    /// Minimum similarity for a stored text to count as a match
    pub match_threshold: f32,

    /// Number of matches returned when the caller gives no limit
    pub match_count: usize,

    /// Connection timeout in seconds
    pub timeout_secs: u64,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Comma-separated CORS origins; empty means any origin
    pub allowed_origins: Option<String>,

    /// Runtime mode, `development` or `production`
    pub environment: String,
}

/// Rate limiting policy
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    pub enabled: bool,
    pub max_requests: usize,
    pub window_secs: u64,
}

/// Sanitizer policy
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    pub max_text_length: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directive
    pub level: String,

    /// `json`, `compact` or `pretty`; chosen from the runtime mode when unset
    pub format: Option<String>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1".to_string(),
            api_key: Secret::new(String::new()),
            model: "text-embedding-ada-002".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for VectorDbConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: Secret::new(String::new()),
            collection: "embeddings".to_string(),
            vector_size: 1536,
            match_threshold: 0.7,
            match_count: 5,
            timeout_secs: 30,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            allowed_origins: None,
            environment: "development".to_string(),
        }
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 100,
            window_secs: 15 * 60,
        }
    }
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            max_text_length: crate::middleware::sanitizer::DEFAULT_MAX_TEXT_LENGTH,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: None,
        }
    }
}

impl Config {
    /// Load configuration from `.env`, the optional config file, and the
    /// process environment, then validate it
    pub fn load() -> crate::error::Result<Self> {
        let config = loader::load_config()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate this configuration
    pub fn validate(&self) -> crate::error::Result<()> {
        validation::validate_config(self)
    }
}

impl ServerConfig {
    /// Whether the service runs in production mode
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    /// Configured CORS origins, trimmed, without empty entries
    pub fn allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl RateLimitSettings {
    /// Convert to the limiter's runtime configuration
    pub fn to_rate_limit_config(&self) -> crate::middleware::RateLimitConfig {
        crate::middleware::RateLimitConfig {
            max_requests: self.max_requests,
            window_duration: std::time::Duration::from_secs(self.window_secs),
            enabled: self.enabled,
        }
    }
}

impl LoggingConfig {
    /// Effective log format for the given runtime mode
    pub fn effective_format(&self, production: bool) -> &str {
        match self.format.as_deref() {
            Some(format) => format,
            None if production => "json",
            None => "pretty",
        }
    }
}

/// Whether a secret holds a non-blank value
pub(crate) fn secret_is_set(secret: &Secret<String>) -> bool {
    !secret.expose_secret().trim().is_empty()
}

/// Custom deserializer for Secret<String>
fn deserialize_secret<'de, D>(deserializer: D) -> Result<Secret<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(Secret::new(s))
}
