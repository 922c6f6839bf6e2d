//! Chat client facade
//!
//! Wraps the relay HTTP surface behind a cache, a health flag, and a
//! subscriber list. Every public operation resolves to a value; network and
//! decode failures end up in [`ChatStatus`], never as panics.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{debug, warn};

use relay_service::MessageResponse;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Cap applied to error strings surfaced for display
const MAX_DISPLAY_ERROR_CHARS: usize = 140;

type Callback = Box<dyn Fn() + Send + Sync>;
type SubscriberList = Mutex<Vec<(u64, Callback)>>;

/// Snapshot of the client's health
#[derive(Debug, Clone, Default)]
pub struct ChatStatus {
    pub healthy: bool,
    pub last_error: Option<String>,
}

impl ChatStatus {
    /// Last error truncated for UI display
    pub fn display_error(&self) -> Option<String> {
        self.last_error
            .as_ref()
            .map(|e| e.chars().take(MAX_DISPLAY_ERROR_CHARS).collect())
    }
}

/// Message payload composed by the UI
///
/// Wire field names match what the relay expects: `author` for the session
/// token, `school` for the initial counter string, `type` for the kind.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OutgoingMessage {
    pub author: Option<String>,
    pub name: Option<String>,
    pub school: Option<String>,
    pub avatar: Option<String>,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Subscription handle; dropping it deregisters the callback
pub struct Subscription {
    id: u64,
    subscribers: Weak<SubscriberList>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.lock().retain(|(id, _)| *id != self.id);
        }
    }
}

#[derive(Default)]
struct ClientState {
    base: Option<String>,
    healthy: bool,
    last_error: Option<String>,
    cache: Vec<MessageResponse>,
    applied_generation: u64,
}

struct Inner {
    http: reqwest::Client,
    config: ClientConfig,
    state: RwLock<ClientState>,
    subscribers: Arc<SubscriberList>,
    next_subscriber: AtomicU64,
    generation: AtomicU64,
}

/// Client facade over the message relay
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<Inner>,
}

impl ChatClient {
    /// Create a client; no network traffic until [`init`](Self::init)
    pub fn new(config: ClientConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                http: reqwest::Client::new(),
                config,
                state: RwLock::new(ClientState::default()),
                subscribers: Arc::new(Mutex::new(Vec::new())),
                next_subscriber: AtomicU64::new(1),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Probe candidates, then populate the cache when one answered
    ///
    /// Subscribers are notified exactly once even when no candidate is
    /// reachable, so a UI can render the unavailable state immediately.
    pub async fn init(&self) {
        let healthy = self.detect_base().await;
        if healthy {
            self.refresh(None).await;
        } else {
            self.notify();
        }
    }

    /// Probe candidate base URLs in priority order
    ///
    /// A candidate qualifies only when it answers 2xx with a JSON array; a
    /// proxy serving an HTML error page with status 200 must not win.
    pub async fn detect_base(&self) -> bool {
        let candidates = self.inner.config.candidates.clone();
        let mut last_error: Option<String> = None;

        for candidate in &candidates {
            match self.fetch_listing(candidate, 1).await {
                Ok(_) => {
                    debug!(base = %candidate, "relay endpoint detected");
                    let mut state = self.inner.state.write();
                    state.base = Some(candidate.clone());
                    state.healthy = true;
                    state.last_error = None;
                    return true;
                }
                Err(e) => {
                    warn!(base = %candidate, error = %e, "candidate probe failed");
                    last_error = Some(e.to_string());
                }
            }
        }

        let mut state = self.inner.state.write();
        state.healthy = false;
        state.last_error =
            Some(last_error.unwrap_or_else(|| ClientError::NoHealthyBase.to_string()));
        false
    }

    /// Re-list from the active base and replace the cache
    ///
    /// Subscribers are notified on success and failure alike. An overlapped
    /// refresh that completes late must not overwrite a newer cache; each
    /// attempt takes a generation number and only the highest applied so far
    /// may write.
    pub async fn refresh(&self, limit: Option<i64>) -> bool {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let limit = limit.unwrap_or(self.inner.config.refresh_limit);

        let base = self.inner.state.read().base.clone();
        let Some(base) = base else {
            {
                let mut state = self.inner.state.write();
                state.healthy = false;
                state.last_error = Some(ClientError::NoHealthyBase.to_string());
            }
            self.notify();
            return false;
        };

        let result = self.fetch_listing(&base, limit).await;
        let ok = result.is_ok();
        {
            let mut state = self.inner.state.write();
            if state.applied_generation <= generation {
                state.applied_generation = generation;
                match result {
                    Ok(messages) => {
                        state.cache = messages;
                        state.healthy = true;
                        state.last_error = None;
                    }
                    Err(e) => {
                        state.healthy = false;
                        state.last_error = Some(e.to_string());
                    }
                }
            }
        }
        self.notify();
        ok
    }

    /// Post a message through the relay
    ///
    /// Returns `false` without touching the network while unhealthy; the
    /// cache is never mutated optimistically, so a `true` return means the
    /// relay accepted the message and the cache was refreshed.
    pub async fn add_message(&self, message: &OutgoingMessage) -> bool {
        let base = {
            let state = self.inner.state.read();
            if !state.healthy {
                return false;
            }
            state.base.clone()
        };
        let Some(base) = base else {
            return false;
        };

        let result = async {
            let response = self.inner.http.post(&base).json(message).send().await?;
            if !response.status().is_success() {
                return Err(ClientError::MalformedResponse(format!(
                    "post rejected with status {}",
                    response.status()
                )));
            }
            Ok::<(), ClientError>(())
        }
        .await;

        match result {
            Ok(()) => {
                self.inner.state.write().last_error = None;
                self.refresh(None).await;
                true
            }
            Err(e) => {
                warn!(error = %e, "message post failed");
                let mut state = self.inner.state.write();
                state.healthy = false;
                state.last_error = Some(e.to_string());
                false
            }
        }
    }

    /// Increment a reaction through the relay
    pub async fn react(&self, id: &str, kind: &str) -> bool {
        let base = {
            let state = self.inner.state.read();
            if !state.healthy {
                return false;
            }
            state.base.clone()
        };
        let Some(base) = base else {
            return false;
        };

        let url = format!("{base}?id={id}&kind={kind}");
        let result = async {
            let response = self.inner.http.patch(&url).send().await?;
            if !response.status().is_success() {
                return Err(ClientError::MalformedResponse(format!(
                    "reaction rejected with status {}",
                    response.status()
                )));
            }
            Ok::<(), ClientError>(())
        }
        .await;

        match result {
            Ok(()) => {
                self.refresh(None).await;
                true
            }
            Err(e) => {
                warn!(error = %e, "reaction failed");
                let mut state = self.inner.state.write();
                state.healthy = false;
                state.last_error = Some(e.to_string());
                false
            }
        }
    }

    /// Register a callback invoked after every refresh/init outcome
    pub fn subscribe(&self, handler: impl Fn() + Send + Sync + 'static) -> Subscription {
        let id = self.inner.next_subscriber.fetch_add(1, Ordering::SeqCst);
        self.inner.subscribers.lock().push((id, Box::new(handler)));
        Subscription {
            id,
            subscribers: Arc::downgrade(&self.inner.subscribers),
        }
    }

    /// Snapshot of the cached listing
    pub fn messages(&self) -> Vec<MessageResponse> {
        self.inner.state.read().cache.clone()
    }

    /// Whether the relay answered the last probe/refresh with good data
    pub fn is_healthy(&self) -> bool {
        self.inner.state.read().healthy
    }

    /// Current health and last error
    pub fn status(&self) -> ChatStatus {
        let state = self.inner.state.read();
        ChatStatus {
            healthy: state.healthy,
            last_error: state.last_error.clone(),
        }
    }

    async fn fetch_listing(&self, base: &str, limit: i64) -> ClientResult<Vec<MessageResponse>> {
        let url = format!("{base}?limit={limit}");
        let response = self.inner.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::MalformedResponse(format!(
                "listing returned status {status}"
            )));
        }

        // A 200 alone is not proof of life; the body must be a JSON array
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ClientError::MalformedResponse(format!("non-JSON body: {e}")))?;
        if !body.is_array() {
            return Err(ClientError::MalformedResponse(
                "listing body is not an array".to_string(),
            ));
        }
        serde_json::from_value(body)
            .map_err(|e| ClientError::MalformedResponse(format!("unexpected list shape: {e}")))
    }

    fn notify(&self) {
        let subscribers = self.inner.subscribers.lock();
        for (_, handler) in subscribers.iter() {
            handler();
        }
    }
}
