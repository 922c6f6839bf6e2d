//! # relay-core
//!
//! Domain layer for the message relay: entities, reaction counters,
//! repository and rate-limiter traits. This crate has zero dependencies on
//! infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{
    Message, MessageDraft, MessageKind, ReactionCounts, ReactionKind, ReactionKindParseError,
};
pub use error::DomainError;
pub use traits::{ListQuery, MessageRepository, RateLimitKind, RateLimiter, RepoResult};
