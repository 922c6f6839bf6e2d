//! Service context - dependency container for the relay
//!
//! Holds the message repository and the rate limiter behind their traits so
//! the relay logic never depends on a concrete store or limiter.

use std::sync::Arc;

use relay_core::{MessageRepository, RateLimiter};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    message_repo: Arc<dyn MessageRepository>,
    rate_limiter: Arc<dyn RateLimiter>,
}

impl ServiceContext {
    /// Create a new service context
    pub fn new(
        message_repo: Arc<dyn MessageRepository>,
        rate_limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        Self {
            message_repo,
            rate_limiter,
        }
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &Arc<dyn MessageRepository> {
        &self.message_repo
    }

    /// Get the rate limiter
    pub fn rate_limiter(&self) -> &Arc<dyn RateLimiter> {
        &self.rate_limiter
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext").finish_non_exhaustive()
    }
}
