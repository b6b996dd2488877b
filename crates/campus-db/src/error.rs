//! Database errors

use thiserror::Error;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Insert collided with a unique constraint
    #[error("unique constraint violated")]
    UniqueViolation,
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => Self::UniqueViolation,
            _ => Self::Sqlx(err),
        }
    }
}

/// Result alias for repository operations
pub type DbResult<T> = Result<T, DbError>;
