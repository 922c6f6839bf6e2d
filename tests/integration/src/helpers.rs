//! Test helpers for integration tests
//!
//! Provides an in-memory message store and a server harness that runs the
//! real router and middleware stack on a loopback port.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use uuid::Uuid;

use relay_api::{create_app, AppState};
use relay_common::{
    AdminConfig, AppConfig, AppSettings, DatabaseConfig, Environment, RateLimitConfig,
    ServerConfig,
};
use relay_core::{DomainError, ListQuery, Message, MessageRepository, RepoResult};
use relay_service::{ServiceContext, SlidingWindowLimiter};

/// In-memory message repository mirroring the relay's query semantics
#[derive(Default)]
pub struct MemoryRepo {
    messages: Mutex<Vec<Message>>,
}

impl MemoryRepo {
    /// Number of stored messages
    pub fn len(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MessageRepository for MemoryRepo {
    async fn list(&self, query: ListQuery) -> RepoResult<Vec<Message>> {
        let messages = self.messages.lock().unwrap();
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

/// A running relay instance on a loopback port
pub struct TestServer {
    pub addr: SocketAddr,
    pub repo: Arc<MemoryRepo>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server with default rate limits
    pub async fn start() -> Result<Self> {
        Self::start_with_rate_limit(RateLimitConfig::default()).await
    }

    /// Start a server with custom rate limits
    pub async fn start_with_rate_limit(rate_limit: RateLimitConfig) -> Result<Self> {
        let repo = Arc::new(MemoryRepo::default());
        let limiter = Arc::new(SlidingWindowLimiter::new(rate_limit.clone()));
        let context = ServiceContext::new(repo.clone(), limiter);
        let state = AppState::new(context, test_config(rate_limit));
        let app = create_app(state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            addr,
            repo,
            _handle: handle,
        })
    }

    /// Base URL of the /messages resource
    pub fn messages_url(&self) -> String {
        format!("http://{}/messages", self.addr)
    }
}

fn test_config(rate_limit: RateLimitConfig) -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "relay-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        rate_limit,
        admin: AdminConfig { token: None },
    }
}
