//! Sliding-window rate limiter
//!
//! Per-client timestamp log with a fixed look-back window. A rejected call
//! is not recorded, so hammering an exhausted key never extends the lockout
//! beyond the window.

use std::time::{SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use tracing::warn;

use relay_common::RateLimitConfig;
use relay_core::{RateLimitKind, RateLimiter};

/// Per-key timestamp logs, one per limited verb
#[derive(Debug, Default)]
struct RateRecord {
    post: Vec<u64>,
    patch: Vec<u64>,
}

/// In-process sliding-window limiter keyed by client identity
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    config: RateLimitConfig,
    records: DashMap<String, RateRecord>,
}

impl SlidingWindowLimiter {
    /// Create a limiter with the given window and quotas
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            records: DashMap::new(),
        }
    }

    /// Check and record an attempt at an explicit instant (unix millis)
    ///
    /// Entries older than the window are dropped first, then the remaining
    /// count is compared against the quota. An allowed attempt is recorded;
    /// a denied one is not.
    pub fn check_at(&self, key: &str, kind: RateLimitKind, now_ms: u64) -> bool {
        let cutoff = now_ms.saturating_sub(self.config.window_ms);
        let max = match kind {
            RateLimitKind::Post => self.config.max_post,
            RateLimitKind::Patch => self.config.max_patch,
        };

        let mut record = self.records.entry(key.to_string()).or_default();
        let log = match kind {
            RateLimitKind::Post => &mut record.post,
            RateLimitKind::Patch => &mut record.patch,
        };

        log.retain(|&ts| ts > cutoff);
        if log.len() >= max {
            return false;
        }
        log.push(now_ms);
        true
    }
}

impl RateLimiter for SlidingWindowLimiter {
    fn check(&self, key: &str, kind: RateLimitKind) -> bool {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => {
                let now_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
                self.check_at(key, kind, now_ms)
            }
            Err(err) => {
                // Fail open: a broken clock must not block writes
                warn!(error = %err, "system clock before unix epoch, allowing request");
                true
            }
        }
    }
}
