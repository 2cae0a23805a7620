//! Database layer for the Transparency Exchange API.
//!
//! Entity store adapter (models + repositories) and relationship manager
//! over PostgreSQL via sqlx. All multi-row writes (entity-plus-association
//! creates, cascade deletes) run inside a single transaction.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod scope;

/// Shared connection pool type.
pub type DbPool = sqlx::PgPool;

/// Create a connection pool with a bounded acquire timeout.
///
/// The timeout keeps store calls from hanging: a saturated pool surfaces
/// as an error after a few seconds instead of blocking the request.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
