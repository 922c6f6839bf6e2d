//! Configuration loading

mod app_config;

pub use app_config::{
    AdminConfig, AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment,
    RateLimitConfig, ServerConfig,
};
