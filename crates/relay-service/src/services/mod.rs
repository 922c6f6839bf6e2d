//! Relay services

mod context;
mod error;
mod relay;

pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use relay::RelayService;
