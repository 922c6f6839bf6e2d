//! Client IP extractor
//!
//! Rate limiting keys on the client address as reported by the reverse
//! proxy. Only the first `x-forwarded-for` entry counts; later entries are
//! proxy hops. Requests without the header share the "unknown" bucket.

use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// Fallback key when no forwarded address is present
const UNKNOWN_CLIENT: &str = "unknown";

/// Client address extracted from `x-forwarded-for`
#[derive(Debug, Clone)]
pub struct ClientIp(pub String);

impl ClientIp {
    /// The rate-limit key for this client
    pub fn key(&self) -> &str {
        &self.0
    }

    fn from_forwarded_for(value: Option<&str>) -> Self {
        let ip = value
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(UNKNOWN_CLIENT);
        Self(ip.to_string())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok());
        Ok(Self::from_forwarded_for(header))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_takes_first_forwarded_entry() {
        let ip = ClientIp::from_forwarded_for(Some("203.0.113.7, 10.0.0.1, 10.0.0.2"));
        assert_eq!(ip.key(), "203.0.113.7");
    }

    #[test]
    fn test_trims_whitespace() {
        let ip = ClientIp::from_forwarded_for(Some("  203.0.113.7  "));
        assert_eq!(ip.key(), "203.0.113.7");
    }

    #[test]
    fn test_missing_header_is_unknown() {
        assert_eq!(ClientIp::from_forwarded_for(None).key(), "unknown");
        assert_eq!(ClientIp::from_forwarded_for(Some("")).key(), "unknown");
    }
}
