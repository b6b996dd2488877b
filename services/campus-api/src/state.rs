//! Application state for the campus API service.

use campus_auth_core::AccountService;
use campus_db::pg::{PgAccountRepository, PgCourseRepository, PgEnrollmentRepository};
use campus_db::DbPool;
use campus_progress_core::ProgressEngine;
use std::sync::Arc;

use crate::config::Config;

/// Account service over the PostgreSQL credential store
pub type AccountServiceImpl = AccountService<PgAccountRepository>;

/// Progress engine over the PostgreSQL enrollment and course stores
pub type ProgressEngineImpl = ProgressEngine<PgEnrollmentRepository, PgCourseRepository>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Registration, login and session validation
    pub auth: Arc<AccountServiceImpl>,
    /// Enrollment and progress tracking
    pub progress: Arc<ProgressEngineImpl>,
    /// Database pool (readiness checks)
    pub pool: DbPool,
    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        auth: AccountServiceImpl,
        progress: ProgressEngineImpl,
        pool: DbPool,
        config: Config,
    ) -> Self {
        Self {
            auth: Arc::new(auth),
            progress: Arc::new(progress),
            pool,
            config: Arc::new(config),
        }
    }

    /// Get request timeout from config
    pub fn request_timeout(&self) -> std::time::Duration {
        self.config.request_timeout
    }
}

#[cfg(test)]
impl AppState {
    /// State over a lazy pool pointed at a closed port; any store access fails fast
    pub(crate) fn for_tests() -> Self {
        use campus_db::Repositories;
        use sqlx::postgres::PgPoolOptions;

        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://campus@127.0.0.1:1/campus".to_string()),
            "JWT_SECRET" => Some("campus-test-secret-with-enough-bytes".to_string()),
            _ => None,
        })
        .unwrap();

        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(std::time::Duration::from_millis(250))
            .connect_lazy(&config.database_url)
            .unwrap();
        let repos = Repositories::new(pool.clone());

        let auth = AccountService::new(
            config.auth.clone().with_password_cost(4),
            Arc::new(repos.accounts.clone()),
        )
        .unwrap();
        let progress = ProgressEngine::new(
            config.progress.clone(),
            Arc::new(repos.enrollments.clone()),
            Arc::new(repos.courses.clone()),
        );

        Self::new(auth, progress, pool, config)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
