//! Message entity - a chat or song-request message flowing through the relay

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Kind of message carried by the relay
///
/// Song requests travel through the same channel as plain chat messages and
/// only differ by this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Message,
    Request,
}

impl MessageKind {
    /// Wire representation (`type` field)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Request => "request",
        }
    }

    /// Parse a wire value, defaulting to [`MessageKind::Message`] when the
    /// value is absent or not a known kind.
    pub fn from_wire(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("request") => Self::Request,
            _ => Self::Message,
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sanitized message ready for insertion
///
/// Field limits are enforced by the service layer before a draft is built;
/// the draft carries no id or timestamp because both are assigned at write
/// time, never taken from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    pub author_session: Option<String>,
    pub name: String,
    pub avatar: Option<String>,
    pub text: String,
    pub kind: MessageKind,
    /// Initial reaction-counter string, stored opaque
    pub reactions: Option<String>,
}

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    /// Opaque client-chosen session token; identifies "mine vs theirs" in
    /// the UI, not authenticated and not unique across messages.
    pub author_session: Option<String>,
    /// Display name. Opaque to the relay - the UI may pack a composite
    /// "name &&& school" string in here and the relay must not parse it.
    pub name: String,
    pub avatar: Option<String>,
    pub text: String,
    pub kind: MessageKind,
    /// Encoded reaction counters (legacy bare integer or JSON object)
    pub reactions: Option<String>,
    /// Server-assigned creation time, also the list ordering key
    pub ts: DateTime<Utc>,
}

impl Message {
    /// Materialize a draft with a fresh id and a server-assigned timestamp
    pub fn from_draft(draft: MessageDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_session: draft.author_session,
            name: draft.name,
            avatar: draft.avatar,
            text: draft.text,
            kind: draft.kind,
            reactions: draft.reactions,
            ts: Utc::now(),
        }
    }

    /// Whether this message is a song request
    #[inline]
    pub fn is_request(&self) -> bool {
        self.kind == MessageKind::Request
    }
}
