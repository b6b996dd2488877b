//! Database connection pool

use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;

use crate::error::DbResult;

/// Database connection pool type alias
pub type DbPool = PgPool;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Pool sizing and timeouts
#[derive(Debug, Clone)]
pub struct PoolOptions {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Create a database connection pool with explicit options
pub async fn create_pool_with_options(
    database_url: &str,
    options: PoolOptions,
) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(options.max_connections)
        .acquire_timeout(options.acquire_timeout)
        .connect(database_url)
        .await
}

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &DbPool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Newest migration version embedded in this build
pub fn expected_schema_version() -> Option<i64> {
    MIGRATOR.iter().map(|migration| migration.version).max()
}

/// Newest migration version successfully applied to the database
pub async fn applied_schema_version(pool: &DbPool) -> DbResult<Option<i64>> {
    let version = sqlx::query_scalar::<_, Option<i64>>(
        "SELECT MAX(version) FROM _sqlx_migrations WHERE success",
    )
    .fetch_one(pool)
    .await?;
    Ok(version)
}
