//! Database module
//!
//! This module owns the connection pool, the row mapping for the `coffees`
//! table and the store the HTTP handlers talk to.

pub mod error;
pub mod mapping;
pub mod store;

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

// Re-export main types
pub use error::StoreError;
pub use store::{CoffeeStore, PgCoffeeStore};

/// Connection pool settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub dsn: String,
    pub max_open_conns: u32,
    /// Connections kept open while idle
    pub max_idle_conns: u32,
    pub conn_max_lifetime: Duration,
}

/// Open a connection pool and make sure the database answers
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_open_conns)
        .min_connections(config.max_idle_conns.min(config.max_open_conns))
        .max_lifetime(config.conn_max_lifetime)
        .connect(&config.dsn)
        .await?;

    ping(&pool).await?;
    Ok(pool)
}

/// Round-trip a trivial query through the pool.
///
/// Failures are returned, not logged; the caller reports them.
pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    info!("Database pinged successfully");
    Ok(())
}

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
