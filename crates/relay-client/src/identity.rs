//! Listener identity
//!
//! The UI collects a display name, an optional school, and an avatar URL.
//! The relay never parses any of it; the school rides inside the display
//! name as a `name &&& school` composite.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Separator inside the composite display name
const NAME_SEPARATOR: &str = " &&& ";

/// Listener identity as persisted by the UI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Identity {
    /// Composite display name sent to the relay
    pub fn display_name(&self) -> String {
        match self.school.as_deref().filter(|s| !s.is_empty()) {
            Some(school) => format!("{}{NAME_SEPARATOR}{school}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Generate a fresh opaque session id
pub fn new_session_id() -> String {
    Uuid::new_v4().to_string()
}
