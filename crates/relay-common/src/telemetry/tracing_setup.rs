//! Tracing subscriber initialization
//!
//! Pretty output in development, JSON in production. `RUST_LOG` overrides
//! the default `info` filter when set.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::config::Environment;

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}

/// Initialize the tracing subscriber for the given environment
///
/// # Panics
/// Panics if a subscriber is already installed; use [`try_init_tracing`]
/// where that can happen (tests, embedded use).
pub fn init_tracing(env: Environment) {
    try_init_tracing(env).expect("tracing subscriber already initialized");
}

/// Try to initialize tracing, reporting an error instead of panicking when
/// a subscriber is already installed.
pub fn try_init_tracing(env: Environment) -> Result<(), TracingError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if env.is_production() {
        registry
            .with(fmt::layer().json().with_file(false).with_line_number(false))
            .try_init()
            .map_err(|_| TracingError::AlreadyInitialized)
    } else {
        registry
            .with(fmt::layer().with_file(true).with_line_number(true))
            .try_init()
            .map_err(|_| TracingError::AlreadyInitialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_init_reports_error() {
        let _ = try_init_tracing(Environment::Development);
        // A subscriber is installed by now, so a second init must fail
        // without panicking.
        assert!(try_init_tracing(Environment::Development).is_err());
    }
}
