//! Domain traits (ports)

mod rate_limit;
mod repositories;

pub use rate_limit::{RateLimitKind, RateLimiter};
pub use repositories::{ListQuery, MessageRepository, RepoResult};
