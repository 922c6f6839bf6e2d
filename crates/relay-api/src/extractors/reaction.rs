//! Reaction query parameters
//!
//! PATCH /messages addresses the target row through the query string, not
//! the path.

use serde::Deserialize;

/// Query parameters of PATCH /messages
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionParams {
    /// Target message id
    #[serde(default)]
    pub id: Option<String>,
    /// Reaction kind, `like` or `heart`
    #[serde(default)]
    pub kind: Option<String>,
}
