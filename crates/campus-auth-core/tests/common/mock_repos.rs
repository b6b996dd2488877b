//! Mock repositories for testing

use async_trait::async_trait;
use campus_db::{AccountRepository, AccountRow, CreateAccount, DbError, DbResult};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// In-memory account repository for testing
#[derive(Default, Clone)]
pub struct MockAccountRepository {
    accounts: Arc<DashMap<i64, AccountRow>>,
    by_username: Arc<DashMap<String, i64>>,
    next_id: Arc<AtomicI64>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an account directly, bypassing registration
    #[allow(dead_code)]
    pub fn insert_account(&self, username: &str, role: &str, session_version: i64) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = AccountRow {
            id,
            username: username.to_string(),
            password_hash: String::new(),
            role: role.to_string(),
            session_version,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.by_username.insert(row.username.clone(), id);
        self.accounts.insert(id, row);
        id
    }

    /// Delete an account (simulates removal after tokens were issued)
    #[allow(dead_code)]
    pub fn remove_account(&self, id: i64) {
        if let Some((_, row)) = self.accounts.remove(&id) {
            self.by_username.remove(&row.username);
        }
    }

    #[allow(dead_code)]
    pub fn version_of(&self, id: i64) -> Option<i64> {
        self.accounts.get(&id).map(|r| r.session_version)
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_id(&self, id: i64) -> DbResult<Option<AccountRow>> {
        Ok(self.accounts.get(&id).map(|r| r.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> DbResult<Option<AccountRow>> {
        Ok(self
            .by_username
            .get(username)
            .and_then(|id| self.accounts.get(id.value()).map(|r| r.value().clone())))
    }

    async fn create(&self, account: CreateAccount) -> DbResult<AccountRow> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        // entry() holds the shard lock, so two concurrent registrations race safely
        match self.by_username.entry(account.username.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => return Err(DbError::UniqueViolation),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }
        let row = AccountRow {
            id,
            username: account.username,
            password_hash: account.password_hash,
            role: account.role,
            session_version: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.accounts.insert(id, row.clone());
        Ok(row)
    }

    async fn upsert_admin(&self, username: &str, password_hash: &str) -> DbResult<AccountRow> {
        let existing = self.by_username.get(username).map(|id| *id.value());
        match existing {
            Some(id) => {
                let mut row = self
                    .accounts
                    .get_mut(&id)
                    .ok_or(DbError::Sqlx(sqlx::Error::RowNotFound))?;
                row.password_hash = password_hash.to_string();
                row.role = "admin".to_string();
                row.updated_at = Utc::now();
                Ok(row.clone())
            }
            None => {
                self.create(CreateAccount {
                    username: username.to_string(),
                    password_hash: password_hash.to_string(),
                    role: "admin".to_string(),
                })
                .await
            }
        }
    }

    async fn session_version(&self, id: i64) -> DbResult<Option<i64>> {
        Ok(self.accounts.get(&id).map(|r| r.session_version))
    }

    async fn bump_session_version(&self, id: i64) -> DbResult<Option<i64>> {
        // get_mut holds the shard write lock across read and increment
        Ok(self.accounts.get_mut(&id).map(|mut r| {
            r.session_version += 1;
            r.updated_at = Utc::now();
            r.session_version
        }))
    }
}

/// Account repository whose every call fails, as if the database were down
#[derive(Default, Clone)]
pub struct FailingAccountRepository;

fn unavailable() -> DbError {
    DbError::Sqlx(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl AccountRepository for FailingAccountRepository {
    async fn find_by_id(&self, _: i64) -> DbResult<Option<AccountRow>> {
        Err(unavailable())
    }

    async fn find_by_username(&self, _: &str) -> DbResult<Option<AccountRow>> {
        Err(unavailable())
    }

    async fn create(&self, _: CreateAccount) -> DbResult<AccountRow> {
        Err(unavailable())
    }

    async fn upsert_admin(&self, _: &str, _: &str) -> DbResult<AccountRow> {
        Err(unavailable())
    }

    async fn session_version(&self, _: i64) -> DbResult<Option<i64>> {
        Err(unavailable())
    }

    async fn bump_session_version(&self, _: i64) -> DbResult<Option<i64>> {
        Err(unavailable())
    }
}
