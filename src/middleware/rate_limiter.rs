//! Fixed-window, per-client rate limiting

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window
    pub max_requests: usize,
    /// Time window duration
    pub window_duration: Duration,
    /// Whether to enable rate limiting
    pub enabled: bool,
}

/// Longest accepted window
pub const MAX_WINDOW: Duration = Duration::from_secs(86_400 * 365);

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window_duration: Duration::from_secs(15 * 60),
            enabled: true,
        }
    }
}

/// Per-client window state
#[derive(Debug, Clone)]
struct RequestRecord {
    count: usize,
    reset_at: Instant,
}

/// Outcome of a rate limit check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// Whole seconds until the client's window resets, set only when denied
    pub retry_after_secs: Option<u64>,
}

impl RateLimitDecision {
    fn allow() -> Self {
        Self {
            allowed: true,
            retry_after_secs: None,
        }
    }

    fn deny(retry_after_secs: u64) -> Self {
        Self {
            allowed: false,
            retry_after_secs: Some(retry_after_secs),
        }
    }
}

/// Fixed-window rate limiter.
///
/// Each client gets a window that starts with its first request and lasts
/// `window_duration`. Requests past `max_requests` inside the window are
/// denied until it expires. A client can therefore burst up to twice the
/// threshold across the boundary of two adjacent windows.
///
/// The check-then-increment for one client runs under that client's
/// DashMap shard lock, so concurrent requests cannot overshoot the limit.
pub struct RateLimiter {
    config: RateLimitConfig,
    records: DashMap<String, RequestRecord>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            records: DashMap::new(),
        }
    }

    /// Evaluate one request from `client_id` at time `now`.
    ///
    /// Expired entries for every client are swept first, so memory is
    /// bounded by clients active within the last window. The sweep only
    /// runs on request traffic; an idle limiter keeps its state.
    pub fn check(&self, client_id: &str, now: Instant) -> RateLimitDecision {
        if !self.config.enabled {
            return RateLimitDecision::allow();
        }

        self.cleanup_expired(now);

        let fresh = RequestRecord {
            count: 1,
            reset_at: self.window_end(now),
        };

        match self.records.entry(client_id.to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(fresh);
                debug!("Opened rate limit window for client: {}", client_id);
                RateLimitDecision::allow()
            }
            Entry::Occupied(mut entry) => {
                let record = entry.get_mut();

                if now > record.reset_at {
                    *record = fresh;
                    debug!("Rate limit window reset for client: {}", client_id);
                    return RateLimitDecision::allow();
                }

                if record.count >= self.config.max_requests {
                    let remaining = record.reset_at.saturating_duration_since(now);
                    let retry_after = remaining.as_millis().div_ceil(1000) as u64;

                    warn!(
                        "Rate limit exceeded for client: {} ({} requests in window)",
                        client_id, record.count
                    );
                    return RateLimitDecision::deny(retry_after);
                }

                record.count += 1;
                debug!(
                    "Request allowed for client: {} ({}/{})",
                    client_id, record.count, self.config.max_requests
                );
                RateLimitDecision::allow()
            }
        }
    }

    /// End of a window opened at `now`, clamped to [`MAX_WINDOW`]
    fn window_end(&self, now: Instant) -> Instant {
        let window = self.config.window_duration.min(MAX_WINDOW);
        now.checked_add(window).unwrap_or(now)
    }

    /// Drop every record whose window has already expired
    pub fn cleanup_expired(&self, now: Instant) {
        self.records.retain(|_, record| now <= record.reset_at);
    }

    /// Number of clients currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.records.len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}
