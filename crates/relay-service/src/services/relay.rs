//! Relay service
//!
//! Handles message listing, posting, and reaction increments. Inputs are
//! sanitized by truncation, never rejected for length, and both write paths
//! consult the rate limiter before touching the store.

use tracing::{info, instrument, warn};
use uuid::Uuid;

use relay_core::{
    ListQuery, Message, MessageDraft, MessageKind, RateLimitKind, ReactionCounts, ReactionKind,
};

use crate::dto::{ListRequest, MessageResponse, PostMessageRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Page size applied when the client sends no `limit`, and the clamp ceiling
const DEFAULT_LIMIT: i64 = 200;
/// Display name used when the client sends none
const DEFAULT_NAME: &str = "Anonymous";

const MAX_AUTHOR_CHARS: usize = 64;
const MAX_NAME_CHARS: usize = 140;
const MAX_REACTIONS_CHARS: usize = 200;
const MAX_AVATAR_CHARS: usize = 200;
const MAX_TEXT_CHARS: usize = 240;

/// Relay service
pub struct RelayService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RelayService<'a> {
    /// Create a new RelayService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List messages in ascending timestamp order
    #[instrument(skip(self))]
    pub async fn list(&self, request: ListRequest) -> ServiceResult<Vec<MessageResponse>> {
        let limit = request.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, DEFAULT_LIMIT);
        let offset = request.offset.unwrap_or(0).max(0);

        let query = ListQuery {
            limit,
            offset,
            query: non_empty(request.q),
            author: non_empty(request.author),
        };

        let messages = self.ctx.message_repo().list(query).await?;
        Ok(messages.into_iter().map(MessageResponse::from).collect())
    }

    /// Post a new message
    ///
    /// `client_key` identifies the caller for rate limiting (normally the
    /// client IP). Overlong fields are truncated, the timestamp is always
    /// server-assigned, and an unknown kind falls back to `message`.
    #[instrument(skip(self, request))]
    pub async fn post(
        &self,
        client_key: &str,
        request: PostMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        if !self.ctx.rate_limiter().check(client_key, RateLimitKind::Post) {
            warn!(client_key, "post rejected by rate limiter");
            return Err(ServiceError::RateLimited);
        }

        // Empty strings count as absent, matching the legacy wire contract.
        let draft = MessageDraft {
            author_session: request
                .author
                .filter(|author| !author.is_empty())
                .map(|author| truncate_chars(&author, MAX_AUTHOR_CHARS)),
            name: request
                .name
                .filter(|name| !name.is_empty())
                .map(|name| truncate_chars(&name, MAX_NAME_CHARS))
                .unwrap_or_else(|| DEFAULT_NAME.to_string()),
            avatar: request
                .avatar
                .filter(|avatar| !avatar.is_empty())
                .map(|avatar| truncate_chars(&avatar, MAX_AVATAR_CHARS)),
            text: request
                .text
                .map(|text| truncate_chars(&text, MAX_TEXT_CHARS))
                .unwrap_or_default(),
            kind: MessageKind::from_wire(request.kind.as_deref()),
            reactions: request
                .school
                .filter(|school| !school.is_empty())
                .map(|school| truncate_chars(&school, MAX_REACTIONS_CHARS)),
        };

        let message = Message::from_draft(draft);
        let stored = self.ctx.message_repo().insert(&message).await?;

        info!(
            message_id = %stored.id,
            kind = stored.kind.as_str(),
            "message posted"
        );
        Ok(MessageResponse::from(stored))
    }

    /// Increment a reaction counter on a message
    ///
    /// Decodes whatever counter encoding the row carries (JSON object, bare
    /// legacy integer, or garbage), bumps the requested counter, and writes
    /// the canonical JSON object back. The read and the write are separate
    /// round trips, so concurrent reactions can lose an increment.
    #[instrument(skip(self))]
    pub async fn react(
        &self,
        client_key: &str,
        id: &str,
        kind: &str,
    ) -> ServiceResult<MessageResponse> {
        if !self.ctx.rate_limiter().check(client_key, RateLimitKind::Patch) {
            warn!(client_key, "reaction rejected by rate limiter");
            return Err(ServiceError::RateLimited);
        }

        let reaction: ReactionKind = kind
            .parse()
            .map_err(|_| ServiceError::validation(format!("Unknown reaction kind: {kind}")))?;

        let message_id: Uuid = id
            .parse()
            .map_err(|_| ServiceError::validation(format!("Invalid message id: {id}")))?;

        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Message", id))?;

        let mut counts = ReactionCounts::decode(message.reactions.as_deref());
        counts.increment(reaction);
        let encoded = counts.encode();

        let updated = self
            .ctx
            .message_repo()
            .update_reactions(message_id, &encoded)
            .await?;

        info!(message_id = %message_id, reaction = %kind, "reaction recorded");
        Ok(MessageResponse::from(updated))
    }
}

/// Truncate to at most `max` characters, respecting UTF-8 boundaries
fn truncate_chars(input: &str, max: usize) -> String {
    input.chars().take(max).collect()
}

/// Trim a filter parameter, dropping it entirely when blank
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use relay_core::{DomainError, MessageRepository, RateLimiter, RepoResult};
    use std::sync::{Arc, Mutex};

    /// In-memory repository for unit tests
    #[derive(Default)]
    struct MemoryRepo {
        messages: Mutex<Vec<Message>>,
    }

    #[async_trait]
    impl MessageRepository for MemoryRepo {
        async fn list(&self, query: ListQuery) -> RepoResult<Vec<Message>> {
            let messages = self.messages.lock().unwrap();
            // Same match-per-combination shape as the Postgres repository:
            // with both filters present the author match ORs into the
            // text/name disjunction.
            let mut matched: Vec<Message> = messages
                .iter()
                .filter(|m| match (&query.query, &query.author) {
                    (Some(q), Some(a)) => {
                        m.text.contains(q)
                            || m.name.contains(q)
                            || m.author_session.as_deref() == Some(a.as_str())
                    }
                    (Some(q), None) => m.text.contains(q) || m.name.contains(q),
                    (None, Some(a)) => m.author_session.as_deref() == Some(a.as_str()),
                    (None, None) => true,
                })
                .cloned()
                .collect();
            matched.sort_by_key(|m| m.ts);
            Ok(matched
                .into_iter()
                .skip(usize::try_from(query.offset).unwrap_or(0))
                .take(usize::try_from(query.limit).unwrap_or(0))
                .collect())
        }

        async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Message>> {
            let messages = self.messages.lock().unwrap();
            Ok(messages.iter().find(|m| m.id == id).cloned())
        }

        async fn insert(&self, message: &Message) -> RepoResult<Message> {
            let mut messages = self.messages.lock().unwrap();
            messages.push(message.clone());
            Ok(message.clone())
        }

        async fn update_reactions(&self, id: Uuid, encoded: &str) -> RepoResult<Message> {
            let mut messages = self.messages.lock().unwrap();
            let message = messages
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or(DomainError::MessageNotFound(id))?;
            message.reactions = Some(encoded.to_string());
            Ok(message.clone())
        }
    }

    /// Limiter that always allows or always denies
    struct FixedLimiter(bool);

    impl RateLimiter for FixedLimiter {
        fn check(&self, _key: &str, _kind: RateLimitKind) -> bool {
            self.0
        }
    }

    fn make_context(allow: bool) -> ServiceContext {
        ServiceContext::new(
            Arc::new(MemoryRepo::default()),
            Arc::new(FixedLimiter(allow)),
        )
    }

    #[tokio::test]
    async fn test_post_truncates_overlong_fields() {
        let ctx = make_context(true);
        let service = RelayService::new(&ctx);

        let request = PostMessageRequest {
            author: Some("a".repeat(100)),
            name: Some("n".repeat(200)),
            school: None,
            avatar: Some("v".repeat(300)),
            text: Some("t".repeat(500)),
            kind: Some("request".to_string()),
            ts: None,
        };

        let response = service.post("1.2.3.4", request).await.unwrap();
        assert_eq!(response.author_session.unwrap().len(), 64);
        assert_eq!(response.name.len(), 140);
        assert_eq!(response.avatar.unwrap().len(), 200);
        assert_eq!(response.text.len(), 240);
        assert_eq!(response.kind, "request");
    }

    #[tokio::test]
    async fn test_post_defaults() {
        let ctx = make_context(true);
        let service = RelayService::new(&ctx);

        let response = service
            .post("1.2.3.4", PostMessageRequest::default())
            .await
            .unwrap();
        assert_eq!(response.name, "Anonymous");
        assert_eq!(response.kind, "message");
        assert!(response.author_session.is_none());
        assert!(response.text.is_empty());
    }

    #[tokio::test]
    async fn test_post_empty_strings_count_as_absent() {
        let ctx = make_context(true);
        let service = RelayService::new(&ctx);

        let request = PostMessageRequest {
            author: Some(String::new()),
            name: Some(String::new()),
            school: Some(String::new()),
            avatar: Some(String::new()),
            ..Default::default()
        };
        let response = service.post("1.2.3.4", request).await.unwrap();
        assert!(response.author_session.is_none());
        assert_eq!(response.name, "Anonymous");
        assert!(response.reactions.is_none());
        assert!(response.avatar.is_none());
    }

    #[tokio::test]
    async fn test_post_ignores_client_timestamp() {
        let ctx = make_context(true);
        let service = RelayService::new(&ctx);

        let before = chrono::Utc::now();
        let request = PostMessageRequest {
            text: Some("hi".to_string()),
            ts: Some(serde_json::json!("1999-01-01T00:00:00Z")),
            ..Default::default()
        };
        let response = service.post("1.2.3.4", request).await.unwrap();
        assert!(response.ts >= before);
    }

    #[tokio::test]
    async fn test_post_rate_limited() {
        let ctx = make_context(false);
        let service = RelayService::new(&ctx);

        let err = service
            .post("1.2.3.4", PostMessageRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::RateLimited));
    }

    #[tokio::test]
    async fn test_list_clamps_paging() {
        let ctx = make_context(true);
        let service = RelayService::new(&ctx);

        for i in 0..5 {
            let request = PostMessageRequest {
                text: Some(format!("msg {i}")),
                ..Default::default()
            };
            service.post("1.2.3.4", request).await.unwrap();
        }

        // limit below the floor clamps to 1
        let page = service
            .list(ListRequest {
                limit: Some(0),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.len(), 1);

        // negative offset clamps to 0
        let page = service
            .list(ListRequest {
                offset: Some(-10),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.len(), 5);

        // oversized limit clamps to the ceiling without erroring
        let page = service
            .list(ListRequest {
                limit: Some(9999),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.len(), 5);
    }

    #[tokio::test]
    async fn test_list_orders_by_timestamp_ascending() {
        let ctx = make_context(true);
        let service = RelayService::new(&ctx);

        for i in 0..3 {
            let request = PostMessageRequest {
                text: Some(format!("msg {i}")),
                ..Default::default()
            };
            service.post("1.2.3.4", request).await.unwrap();
        }

        let page = service.list(ListRequest::default()).await.unwrap();
        assert_eq!(page.len(), 3);
        for pair in page.windows(2) {
            assert!(pair[0].ts <= pair[1].ts);
        }
    }

    #[tokio::test]
    async fn test_list_query_excludes_nonmatching_authorless_messages() {
        let ctx = make_context(true);
        let service = RelayService::new(&ctx);

        service
            .post(
                "1.2.3.4",
                PostMessageRequest {
                    text: Some("now playing jazz".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        service
            .post(
                "1.2.3.4",
                PostMessageRequest {
                    text: Some("hello".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let page = service
            .list(ListRequest {
                q: Some("jazz".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].text, "now playing jazz");
    }

    #[tokio::test]
    async fn test_list_drops_blank_filters() {
        let ctx = make_context(true);
        let service = RelayService::new(&ctx);

        service
            .post(
                "1.2.3.4",
                PostMessageRequest {
                    text: Some("hello".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let page = service
            .list(ListRequest {
                q: Some("   ".to_string()),
                author: Some(String::new()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
    }

    #[tokio::test]
    async fn test_react_increments_and_reencodes() {
        let ctx = make_context(true);
        let service = RelayService::new(&ctx);

        let posted = service
            .post(
                "1.2.3.4",
                PostMessageRequest {
                    text: Some("react to me".to_string()),
                    school: Some("3".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = service
            .react("1.2.3.4", &posted.id.to_string(), "like")
            .await
            .unwrap();
        assert_eq!(
            updated.reactions.as_deref(),
            Some(r#"{"like":4,"heart":0}"#)
        );

        let updated = service
            .react("1.2.3.4", &posted.id.to_string(), "heart")
            .await
            .unwrap();
        assert_eq!(
            updated.reactions.as_deref(),
            Some(r#"{"like":4,"heart":1}"#)
        );
    }

    #[tokio::test]
    async fn test_react_unknown_message() {
        let ctx = make_context(true);
        let service = RelayService::new(&ctx);

        let err = service
            .react("1.2.3.4", &Uuid::new_v4().to_string(), "like")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_react_invalid_inputs() {
        let ctx = make_context(true);
        let service = RelayService::new(&ctx);

        let err = service
            .react("1.2.3.4", &Uuid::new_v4().to_string(), "thumbsdown")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = service.react("1.2.3.4", "not-a-uuid", "like").await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let input = "héllo wörld";
        let truncated = truncate_chars(input, 4);
        assert_eq!(truncated, "héll");
    }
}
