//! Local fallback message store
//!
//! File-backed JSON store used only when no relay endpoint is reachable.
//! Unlike the relay, reactions here are per-session toggles: reacting twice
//! with the same session id removes the reaction. Entries older than seven
//! days are pruned on read; this is presentation policy, not retention
//! policy, and the store is abandoned once a backend answers.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use relay_core::ReactionKind;

/// Age limit for locally kept messages
const RETENTION_DAYS: i64 = 7;

/// Per-kind session id lists
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalReactions {
    #[serde(default)]
    pub like: Vec<String>,
    #[serde(default)]
    pub heart: Vec<String>,
}

impl LocalReactions {
    fn sessions_mut(&mut self, kind: ReactionKind) -> &mut Vec<String> {
        match kind {
            ReactionKind::Like => &mut self.like,
            ReactionKind::Heart => &mut self.heart,
        }
    }

    /// Session ids that reacted with the given kind
    pub fn sessions(&self, kind: ReactionKind) -> &[String] {
        match kind {
            ReactionKind::Like => &self.like,
            ReactionKind::Heart => &self.heart,
        }
    }
}

/// Message as kept in the local store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalMessage {
    pub id: String,
    #[serde(default)]
    pub author: Option<String>,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Creation time in unix milliseconds
    pub ts: i64,
    #[serde(default)]
    pub reactions: LocalReactions,
}

/// File-backed fallback store
#[derive(Debug)]
pub struct LocalMessageStore {
    path: PathBuf,
}

impl LocalMessageStore {
    /// Open a store at the given path; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read all messages, pruning anything older than the retention window
    ///
    /// The pruned list is written back so the file never grows unbounded.
    pub fn messages(&self) -> Vec<LocalMessage> {
        let cutoff = Utc::now().timestamp_millis() - RETENTION_DAYS * 24 * 60 * 60 * 1000;
        let mut messages = self.read();
        let before = messages.len();
        messages.retain(|m| m.ts >= cutoff);
        if messages.len() != before {
            self.write(&messages);
        }
        messages
    }

    /// Append a message
    pub fn add_message(&self, message: LocalMessage) {
        let mut messages = self.messages();
        messages.push(message);
        self.write(&messages);
    }

    /// Toggle a reaction for the given session
    ///
    /// Returns `true` when the reaction is now set, `false` when it was
    /// removed or the message does not exist.
    pub fn toggle_reaction(&self, id: &str, kind: ReactionKind, session: &str) -> bool {
        let mut messages = self.messages();
        let mut now_set = false;
        for message in &mut messages {
            if message.id != id {
                continue;
            }
            let sessions = message.reactions.sessions_mut(kind);
            if let Some(pos) = sessions.iter().position(|s| s == session) {
                sessions.remove(pos);
            } else {
                sessions.push(session.to_string());
                now_set = true;
            }
        }
        self.write(&messages);
        now_set
    }

    fn read(&self) -> Vec<LocalMessage> {
        match fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(path = %self.path.display(), error = %e, "local store unreadable, starting empty");
                Vec::new()
            }),
            Err(_) => Vec::new(),
        }
    }

    fn write(&self, messages: &[LocalMessage]) {
        match serde_json::to_string(messages) {
            Ok(content) => {
                if let Err(e) = fs::write(&self.path, content) {
                    warn!(path = %self.path.display(), error = %e, "local store write failed");
                }
            }
            Err(e) => warn!(error = %e, "local store serialization failed"),
        }
    }
}
