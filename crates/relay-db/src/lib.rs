//! # relay-db
//!
//! PostgreSQL implementation of the message store.

pub mod models;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, DatabaseConfig};
pub use repositories::PgMessageRepository;

// Re-export the pool type so downstream crates avoid a direct sqlx
// dependency for wiring.
pub use sqlx::PgPool;

/// Run pending migrations against the given pool
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
