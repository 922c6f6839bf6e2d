//! Request DTOs
//!
//! The relay sanitizes by truncation rather than rejection, so every field
//! arrives optional and raw; the service layer applies the limits.

use serde::Deserialize;

/// Listing parameters (query string of GET /messages)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRequest {
    /// Page size, clamped to [1, 200]; defaults to 200
    pub limit: Option<i64>,
    /// Page start, clamped to >= 0
    pub offset: Option<i64>,
    /// Free-text substring filter over text and name
    pub q: Option<String>,
    /// Author session filter (ORed into the text/name match when both
    /// filters are present)
    pub author: Option<String>,
}

/// Body of POST /messages
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostMessageRequest {
    /// Client-chosen session token
    pub author: Option<String>,
    pub name: Option<String>,
    /// Initial reaction-counter string; the wire keeps the legacy name of
    /// the reused column.
    pub school: Option<String>,
    pub avatar: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Accepted but ignored: timestamps are always server-assigned
    #[serde(default)]
    pub ts: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_request_deserializes_wire_names() {
        let body = serde_json::json!({
            "author": "sess-1",
            "name": "dj",
            "text": "hello",
            "type": "request",
            "school": "{\"like\":0,\"heart\":0}",
            "ts": 1_700_000_000_000_u64
        });
        let request: PostMessageRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.kind.as_deref(), Some("request"));
        assert!(request.school.is_some());
        assert!(request.ts.is_some());
    }

    #[test]
    fn test_post_request_allows_minimal_body() {
        let request: PostMessageRequest = serde_json::from_str("{}").unwrap();
        assert!(request.text.is_none());
        assert!(request.kind.is_none());
    }
}
