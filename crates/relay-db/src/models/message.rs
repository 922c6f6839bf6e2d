//! Message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use relay_core::{Message, MessageKind};

/// Database model for the messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: Uuid,
    pub author_session: Option<String>,
    pub name: String,
    pub avatar: Option<String>,
    pub text: String,
    pub kind: String,
    pub reactions: Option<String>,
    pub ts: DateTime<Utc>,
}

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Self {
            id: model.id,
            author_session: model.author_session,
            name: model.name,
            avatar: model.avatar,
            text: model.text,
            // Unknown kinds stored by older writers degrade to plain
            // messages rather than failing the row.
            kind: MessageKind::from_wire(Some(&model.kind)),
            reactions: model.reactions,
            ts: model.ts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_degrades_to_message() {
        let model = MessageModel {
            id: Uuid::nil(),
            author_session: None,
            name: "dj".to_string(),
            avatar: None,
            text: "hi".to_string(),
            kind: "shoutout".to_string(),
            reactions: None,
            ts: Utc::now(),
        };
        let message = Message::from(model);
        assert_eq!(message.kind, MessageKind::Message);
    }
}
