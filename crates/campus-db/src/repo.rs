//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;

use crate::error::DbResult;
use crate::models::*;

/// Account repository trait (the credential store)
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by ID
    async fn find_by_id(&self, id: i64) -> DbResult<Option<AccountRow>>;

    /// Find an account by username
    async fn find_by_username(&self, username: &str) -> DbResult<Option<AccountRow>>;

    /// Create a new account with `session_version = 0`.
    ///
    /// Fails with [`crate::DbError::UniqueViolation`] if the username is taken.
    async fn create(&self, account: CreateAccount) -> DbResult<AccountRow>;

    /// Create the admin account, or reset an existing one's password and role
    async fn upsert_admin(&self, username: &str, password_hash: &str) -> DbResult<AccountRow>;

    /// Current session version, `None` if the account does not exist
    async fn session_version(&self, id: i64) -> DbResult<Option<i64>>;

    /// Atomically increment the session version and return the new value.
    ///
    /// Implementations must perform the increment as a single store operation;
    /// two concurrent calls always observe distinct results. Returns `None` if
    /// the account does not exist.
    async fn bump_session_version(&self, id: i64) -> DbResult<Option<i64>>;
}

/// Create account input
#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

/// Enrollment repository trait
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Find the enrollment for a (user, course) pair
    async fn find(&self, user_id: i64, course_id: i64) -> DbResult<Option<EnrollmentRow>>;

    /// Find all enrollments for a user, newest first
    async fn find_by_user_id(&self, user_id: i64) -> DbResult<Vec<EnrollmentRow>>;

    /// Create an enrollment with empty state and zero progress.
    ///
    /// Fails with [`crate::DbError::UniqueViolation`] if the pair is already enrolled.
    async fn create(&self, user_id: i64, course_id: i64) -> DbResult<EnrollmentRow>;

    /// Compare-and-swap a progress update.
    ///
    /// Writes state, progress and finished flag and increments `revision`,
    /// but only if the stored revision still equals `expected_revision`.
    /// Returns `true` if the write was applied.
    async fn write_progress(&self, write: ProgressWrite) -> DbResult<bool>;
}

/// Progress write input
#[derive(Debug, Clone)]
pub struct ProgressWrite {
    pub enrollment_id: i64,
    pub expected_revision: i64,
    pub state: String,
    pub progress: f64,
    pub is_finished: bool,
}

/// Course repository trait (read-only view of the course catalogue)
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Number of chapters in the course outline, `None` if the course does not exist
    async fn chapter_count(&self, course_id: i64) -> DbResult<Option<usize>>;
}
