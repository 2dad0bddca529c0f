//! Markup stripping and length enforcement for user-supplied text

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Default maximum length of sanitized text, in characters
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 10_000;

static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script>").expect("valid script pattern"));

static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));

// Unbalanced brackets left behind once every complete tag is gone.
static STRAY_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[<>]").expect("valid bracket pattern"));

/// Strips script blocks and markup from free text.
///
/// The length bound applies to the sanitized output, not the raw input:
/// a long string that is mostly markup is accepted if what remains fits.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    max_length: usize,
}

impl Sanitizer {
    /// Create a sanitizer with a custom maximum length
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Sanitize a text value
    pub fn sanitize(&self, text: &str) -> Result<String, SanitizeError> {
        let without_scripts = SCRIPT_BLOCK.replace_all(text, "");
        let without_tags = MARKUP_TAG.replace_all(&without_scripts, "");
        let sanitized = STRAY_BRACKET.replace_all(&without_tags, "").trim().to_string();

        let length = sanitized.chars().count();
        if length > self.max_length {
            warn!("Sanitized text too long ({} > {})", length, self.max_length);
            return Err(SanitizeError::TextTooLong {
                max_length: self.max_length,
            });
        }

        debug!("Sanitized text from {} to {} bytes", text.len(), sanitized.len());
        Ok(sanitized)
    }

    /// Sanitize an arbitrary JSON value, rejecting anything that is not a string
    pub fn sanitize_value(&self, value: &serde_json::Value) -> Result<String, SanitizeError> {
        match value.as_str() {
            Some(text) => self.sanitize(text),
            None => Err(SanitizeError::InvalidInput),
        }
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TEXT_LENGTH)
    }
}

/// Sanitization errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SanitizeError {
    #[error("Input must be a string")]
    InvalidInput,

    #[error("Text too long. Maximum {} characters allowed.", group_digits(.max_length))]
    TextTooLong { max_length: usize },
}

/// Render a count with thousands separators (10000 -> "10,000")
fn group_digits(value: &usize) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
