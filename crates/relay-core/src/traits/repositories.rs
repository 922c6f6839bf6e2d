//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs; the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::Message;
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Validated listing parameters
///
/// `limit` and `offset` are expected to be clamped by the caller before a
/// query reaches the repository ([1, 200] and >= 0 respectively). `query`
/// and `author` are trimmed, non-empty filters.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub limit: i64,
    pub offset: i64,
    /// Free-text substring filter over message text and display name
    pub query: Option<String>,
    /// Author session filter. When combined with `query` the author match
    /// is ORed into the text/name disjunction, not ANDed - a compatibility
    /// quirk the wire contract depends on.
    pub author: Option<String>,
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// List messages ordered by ascending timestamp (newest last)
    async fn list(&self, query: ListQuery) -> RepoResult<Vec<Message>>;

    /// Find a message by id
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Message>>;

    /// Insert a message and return the stored row
    async fn insert(&self, message: &Message) -> RepoResult<Message>;

    /// Overwrite the encoded reaction-counter string and return the
    /// updated row.
    ///
    /// This is the write half of a non-atomic read-modify-write: two
    /// concurrent reactions to the same message can interleave and lose an
    /// increment. Implementations backed by a store with a conditional
    /// update or increment primitive may strengthen this without the
    /// service layer changing.
    async fn update_reactions(&self, id: Uuid, encoded: &str) -> RepoResult<Message>;
}
