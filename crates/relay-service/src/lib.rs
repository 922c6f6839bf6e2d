//! # relay-service
//!
//! Business logic for the message relay: input sanitization, rate-limit
//! enforcement, reaction increments, and the DTOs of the wire contract.

pub mod dto;
pub mod limiter;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::{
    HealthResponse, ListRequest, MessageResponse, PostMessageRequest, ReadinessResponse,
};
pub use limiter::SlidingWindowLimiter;
pub use services::{RelayService, ServiceContext, ServiceError, ServiceResult};
