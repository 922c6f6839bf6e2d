//! Rate limiter trait (port)
//!
//! The relay enforces per-client throughput bounds on writes. The limiter
//! is injectable so a shared store (e.g. a counting cache) can replace the
//! process-local default in a horizontally scaled deployment without the
//! relay logic changing.

/// The two write operations subject to limiting; reads are never limited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateLimitKind {
    Post,
    Patch,
}

impl RateLimitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Patch => "patch",
        }
    }
}

/// Per-client sliding-window rate limiting
pub trait RateLimiter: Send + Sync {
    /// Returns `true` when the client may proceed, recording the attempt;
    /// returns `false` without recording when the client is over quota.
    ///
    /// Implementations must fail open: an internal fault must allow the
    /// request rather than deny service.
    fn check(&self, key: &str, kind: RateLimitKind) -> bool;
}
