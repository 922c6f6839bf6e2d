//! Client configuration

/// Page size requested on refresh when the caller gives none
pub const DEFAULT_REFRESH_LIMIT: i64 = 200;

/// Configuration for [`crate::ChatClient`]
///
/// `candidates` are probed in order; the first that answers with a
/// well-formed listing becomes the active base.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub candidates: Vec<String>,
    pub refresh_limit: i64,
}

impl ClientConfig {
    /// Create a config with the given candidate base URLs
    pub fn new(candidates: Vec<String>) -> Self {
        Self {
            candidates,
            refresh_limit: DEFAULT_REFRESH_LIMIT,
        }
    }

    /// Override the refresh page size
    #[must_use]
    pub fn with_refresh_limit(mut self, limit: i64) -> Self {
        self.refresh_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_refresh_limit() {
        let config = ClientConfig::new(vec!["http://localhost/messages".to_string()]);
        assert_eq!(config.refresh_limit, 200);
        assert_eq!(config.with_refresh_limit(50).refresh_limit, 50);
    }
}
