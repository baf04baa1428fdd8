//! # Parent Portal DB
//!
//! Database pool and migrations for the Parent Portal API.
//!
//! This crate provides database connection pool initialization using SQLx with
//! PostgreSQL. At startup the service waits for the database: the initial
//! connection is retried forever with a fixed delay, logging every failure.
//!
//! # Example
//!
//! ```ignore
//! use parent_portal_config::DatabaseConfig;
//! use parent_portal_db::{init_db_pool, run_migrations};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_db_pool(&config).await;
//!     run_migrations(&pool).await?;
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::time::Duration;

use parent_portal_config::DatabaseConfig;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Schema migrations embedded from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Initializes a PostgreSQL connection pool, waiting until the database accepts
/// connections.
///
/// The returned pool is cheaply cloneable and should be passed to the
/// application state for use in request handlers.
pub async fn init_db_pool(config: &DatabaseConfig) -> PgPool {
    let options = PgPoolOptions::new().max_connections(config.max_connections);

    connect_with_retry(config.retry_delay, || {
        let options = options.clone();
        async move { options.connect(&config.url).await }
    })
    .await
}

/// Runs `connect` until it succeeds, sleeping `delay` between attempts.
pub async fn connect_with_retry<T, E, F, Fut>(delay: Duration, mut connect: F) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt: u64 = 1;
    loop {
        match connect().await {
            Ok(value) => {
                info!(attempt, "Connected to database");
                return value;
            }
            Err(e) => {
                warn!(
                    attempt,
                    retry_in_secs = delay.as_secs(),
                    error = %e,
                    "Database connection failed, retrying"
                );
                attempt += 1;
                tokio::time::sleep(delay).await;
            }
        }
    }
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
