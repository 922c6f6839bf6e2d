//! Data transfer objects for the relay wire contract

mod requests;
mod responses;

pub use requests::{ListRequest, PostMessageRequest};
pub use responses::{HealthChecks, HealthResponse, MessageResponse, ReadinessResponse};
