//! Multimedias Database Layer
//!
//! Postgres repositories for media items, host records, media boxes and
//! media configs, plus the store traits the admin workflows run against.

pub mod db;
pub mod store_traits;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use multimedias_core::Config;

// Re-exports: repositories
pub use db::{MediaBoxRepository, MediaConfigRepository, MediaHostRepository, MediaRepository};

// Re-exports: transaction utilities
pub use db::transaction::TransactionGuard;

// Re-exports: store traits
pub use store_traits::{MediaBoxStore, MediaStore, PgMediaStore};

pub use sqlx::PgPool;

/// Open a connection pool sized from `config`.
pub async fn connect(config: &Config) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Apply the workspace migrations.
pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations applied");
    Ok(())
}
