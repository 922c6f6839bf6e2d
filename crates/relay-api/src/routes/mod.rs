//! Route definitions
//!
//! The relay exposes a single /messages resource plus health probes.

use axum::{
    routing::get,
    Router,
};

use crate::handlers::{health, messages};
use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route(
            "/messages",
            get(messages::list_messages)
                .post(messages::post_message)
                .patch(messages::react_to_message)
                .options(messages::options_messages),
        )
        .merge(health_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}
