//! PostgreSQL repository implementations

mod account;
mod course;
mod enrollment;

pub use account::PgAccountRepository;
pub use course::PgCourseRepository;
pub use enrollment::PgEnrollmentRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub accounts: PgAccountRepository,
    pub enrollments: PgEnrollmentRepository,
    pub courses: PgCourseRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            accounts: PgAccountRepository::new(pool.clone()),
            enrollments: PgEnrollmentRepository::new(pool.clone()),
            courses: PgCourseRepository::new(pool),
        }
    }
}
