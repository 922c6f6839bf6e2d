//! Client error types

use thiserror::Error;

/// Client-side failure
///
/// These never cross the facade boundary as panics; public operations
/// resolve to booleans and record the message in the status.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("No reachable relay endpoint")]
    NoHealthyBase,

    #[error("Local store error: {0}")]
    Store(#[from] std::io::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
