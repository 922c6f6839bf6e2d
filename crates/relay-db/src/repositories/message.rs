//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use relay_core::{ListQuery, Message, MessageRepository, RepoResult};

use crate::models::MessageModel;

use super::error::{map_db_error, message_not_found};

const COLUMNS: &str = "id, author_session, name, avatar, text, kind, reactions, ts";

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self))]
    async fn list(&self, query: ListQuery) -> RepoResult<Vec<Message>> {
        // One query shape per filter combination. When both filters are
        // present the author match is ORed into the text/name disjunction;
        // the UI's "mine plus matching" view depends on that shape.
        let results = match (query.query.as_deref(), query.author.as_deref()) {
            (Some(term), Some(author)) => {
                let pattern = like_pattern(term);
                sqlx::query_as::<_, MessageModel>(&format!(
                    r"
                    SELECT {COLUMNS}
                    FROM messages
                    WHERE text ILIKE $1 OR name ILIKE $1 OR author_session = $2
                    ORDER BY ts ASC
                    LIMIT $3 OFFSET $4
                    "
                ))
                .bind(pattern)
                .bind(author)
                .bind(query.limit)
                .bind(query.offset)
                .fetch_all(&self.pool)
                .await
            }
            (Some(term), None) => {
                let pattern = like_pattern(term);
                sqlx::query_as::<_, MessageModel>(&format!(
                    r"
                    SELECT {COLUMNS}
                    FROM messages
                    WHERE text ILIKE $1 OR name ILIKE $1
                    ORDER BY ts ASC
                    LIMIT $2 OFFSET $3
                    "
                ))
                .bind(pattern)
                .bind(query.limit)
                .bind(query.offset)
                .fetch_all(&self.pool)
                .await
            }
            (None, Some(author)) => {
                sqlx::query_as::<_, MessageModel>(&format!(
                    r"
                    SELECT {COLUMNS}
                    FROM messages
                    WHERE author_session = $1
                    ORDER BY ts ASC
                    LIMIT $2 OFFSET $3
                    "
                ))
                .bind(author)
                .bind(query.limit)
                .bind(query.offset)
                .fetch_all(&self.pool)
                .await
            }
            (None, None) => {
                sqlx::query_as::<_, MessageModel>(&format!(
                    r"
                    SELECT {COLUMNS}
                    FROM messages
                    ORDER BY ts ASC
                    LIMIT $1 OFFSET $2
                    "
                ))
                .bind(query.limit)
                .bind(query.offset)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(&format!(
            r"
            SELECT {COLUMNS}
            FROM messages
            WHERE id = $1
            "
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self, message))]
    async fn insert(&self, message: &Message) -> RepoResult<Message> {
        let inserted = sqlx::query_as::<_, MessageModel>(&format!(
            r"
            INSERT INTO messages (id, author_session, name, avatar, text, kind, reactions, ts)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "
        ))
        .bind(message.id)
        .bind(&message.author_session)
        .bind(&message.name)
        .bind(&message.avatar)
        .bind(&message.text)
        .bind(message.kind.as_str())
        .bind(&message.reactions)
        .bind(message.ts)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Message::from(inserted))
    }

    #[instrument(skip(self))]
    async fn update_reactions(&self, id: Uuid, encoded: &str) -> RepoResult<Message> {
        let updated = sqlx::query_as::<_, MessageModel>(&format!(
            r"
            UPDATE messages
            SET reactions = $2
            WHERE id = $1
            RETURNING {COLUMNS}
            "
        ))
        .bind(id)
        .bind(encoded)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| message_not_found(id))?;

        Ok(Message::from(updated))
    }
}

/// Build a contains-pattern for ILIKE, escaping the wildcard metacharacters
/// so user input stays a literal substring match.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
