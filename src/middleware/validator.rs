//! Input validation for embed and search request bodies

use serde_json::Value;
use tracing::{debug, warn};

/// Smallest accepted search limit
pub const MIN_SEARCH_LIMIT: f64 = 1.0;

/// Largest accepted search limit
pub const MAX_SEARCH_LIMIT: f64 = 100.0;

/// Input validator
pub struct InputValidator;

impl InputValidator {
    /// Validate the `text` field: present, a string, and non-empty
    pub fn validate_text(body: &Value) -> Result<&str, ValidationError> {
        match body.get("text").and_then(Value::as_str) {
            Some(text) if !text.is_empty() => {
                debug!("Text validation passed");
                Ok(text)
            }
            _ => {
                warn!("Validation failed: missing or invalid text");
                Err(ValidationError::InvalidText)
            }
        }
    }

    /// Validate the optional `limit` field.
    ///
    /// An absent field is valid. A present field must be a JSON number in
    /// `[1, 100]`; `null` counts as present. Fractional values are
    /// truncated toward zero.
    pub fn validate_limit(body: &Value) -> Result<Option<usize>, ValidationError> {
        let Some(raw) = body.get("limit") else {
            return Ok(None);
        };

        match raw.as_f64() {
            Some(limit) if (MIN_SEARCH_LIMIT..=MAX_SEARCH_LIMIT).contains(&limit) => {
                debug!("Limit validation passed: {}", limit);
                Ok(Some(limit.trunc() as usize))
            }
            _ => {
                warn!("Validation failed: invalid limit {}", raw);
                Err(ValidationError::InvalidLimit)
            }
        }
    }
}

/// Validation errors. The messages are part of the HTTP contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing or invalid text")]
    InvalidText,

    #[error("Invalid limit. Must be a number between 1 and 100")]
    InvalidLimit,
}
