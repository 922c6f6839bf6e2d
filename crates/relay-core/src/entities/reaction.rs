//! Reaction counters - per-message like/heart tallies
//!
//! Counters live in a reused text column and have accumulated two encodings
//! over time: a legacy bare integer string (the like count alone) and a JSON
//! object carrying both counters. Decoding must accept either and treat
//! anything unparsable as zero rather than failing the request.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// A reaction kind accepted by the relay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionKind {
    Like,
    Heart,
}

impl ReactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Heart => "heart",
        }
    }
}

impl std::fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unknown reaction kinds (any value other than like/heart)
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid reaction kind: {0}")]
pub struct ReactionKindParseError(pub String);

impl std::str::FromStr for ReactionKind {
    type Err = ReactionKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "heart" => Ok(Self::Heart),
            other => Err(ReactionKindParseError(other.to_string())),
        }
    }
}

/// Decoded reaction counters for a message
///
/// Counters are monotonically non-decreasing at the relay; there is no
/// unlike operation server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReactionCounts {
    pub like: u64,
    pub heart: u64,
}

impl ReactionCounts {
    pub fn new(like: u64, heart: u64) -> Self {
        Self { like, heart }
    }

    /// Decode a stored counter string, defensively.
    ///
    /// Accepts the JSON object form `{"like": n, "heart": m}`, the legacy
    /// bare-integer form (like count only), and decodes anything else as
    /// zero/zero. Numeric fields inside the object may themselves be
    /// numbers or numeric strings; negatives clamp to zero.
    pub fn decode(raw: Option<&str>) -> Self {
        let Some(s) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::default();
        };

        match serde_json::from_str::<Value>(s) {
            Ok(Value::Object(map)) => Self {
                like: field_as_count(map.get("like")),
                heart: field_as_count(map.get("heart")),
            },
            Ok(Value::Number(n)) => Self {
                like: n.as_i64().map_or(0, |v| v.max(0) as u64),
                heart: 0,
            },
            // Legacy rows may hold a bare integer that is not valid JSON
            // once whitespace or stray characters crept in; fall back to a
            // plain integer parse and give up to zeros after that.
            _ => Self {
                like: s.parse::<i64>().map_or(0, |v| v.max(0) as u64),
                heart: 0,
            },
        }
    }

    /// Encode to the canonical JSON object form, `like` first
    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"like":0,"heart":0}"#.to_string())
    }

    /// Increment the selected counter by exactly one
    pub fn increment(&mut self, kind: ReactionKind) {
        match kind {
            ReactionKind::Like => self.like += 1,
            ReactionKind::Heart => self.heart += 1,
        }
    }
}

fn field_as_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_i64().map_or(0, |v| v.max(0) as u64),
        Some(Value::String(s)) => s.trim().parse::<i64>().map_or(0, |v| v.max(0) as u64),
        _ => 0,
    }
}
