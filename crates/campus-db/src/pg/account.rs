//! PostgreSQL account repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::AccountRow;
use crate::repo::{AccountRepository, CreateAccount};

/// PostgreSQL account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    /// Create a new account repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_by_id(&self, id: i64) -> DbResult<Option<AccountRow>> {
        let account = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, username, password_hash, role, session_version,
                   created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_by_username(&self, username: &str) -> DbResult<Option<AccountRow>> {
        let account = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, username, password_hash, role, session_version,
                   created_at, updated_at
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn create(&self, account: CreateAccount) -> DbResult<AccountRow> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (username, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, role, session_version,
                      created_at, updated_at
            "#,
        )
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(&account.role)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn upsert_admin(&self, username: &str, password_hash: &str) -> DbResult<AccountRow> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (username, password_hash, role)
            VALUES ($1, $2, 'admin')
            ON CONFLICT (username) DO UPDATE
                SET password_hash = EXCLUDED.password_hash,
                    role = 'admin',
                    updated_at = NOW()
            RETURNING id, username, password_hash, role, session_version,
                      created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn session_version(&self, id: i64) -> DbResult<Option<i64>> {
        let version = sqlx::query_scalar::<_, i64>(
            "SELECT session_version FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(version)
    }

    async fn bump_session_version(&self, id: i64) -> DbResult<Option<i64>> {
        // Single statement: the row lock taken by UPDATE serializes concurrent bumps
        let version = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE accounts
            SET session_version = session_version + 1, updated_at = NOW()
            WHERE id = $1
            RETURNING session_version
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(version)
    }
}
