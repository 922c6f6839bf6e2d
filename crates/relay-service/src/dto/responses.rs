//! Response DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use relay_core::Message;

/// Wire representation of a message
///
/// Field names follow the legacy contract: `type` for the kind, `school`
/// for the encoded reaction counters, `ts` for the server-assigned
/// timestamp. Clients decode the counter string themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub author_session: Option<String>,
    pub name: String,
    #[serde(rename = "school")]
    pub reactions: Option<String>,
    pub avatar: Option<String>,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub ts: DateTime<Utc>,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            author_session: message.author_session,
            name: message.name,
            reactions: message.reactions,
            avatar: message.avatar,
            text: message.text,
            kind: message.kind.as_str().to_string(),
            ts: message.ts,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
