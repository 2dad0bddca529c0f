//! Middleware components for request processing

pub mod rate_limiter;
pub mod sanitizer;
pub mod security;
pub mod validator;

pub use rate_limiter::{RateLimitConfig, RateLimitDecision, RateLimiter, MAX_WINDOW};
pub use sanitizer::{SanitizeError, Sanitizer};
pub use validator::{InputValidator, ValidationError};
