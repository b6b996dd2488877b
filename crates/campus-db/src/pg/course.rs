//! PostgreSQL course repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::CourseOutlineRow;
use crate::repo::CourseRepository;

/// PostgreSQL course repository
#[derive(Clone)]
pub struct PgCourseRepository {
    pool: PgPool,
}

impl PgCourseRepository {
    /// Create a new course repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    async fn chapter_count(&self, course_id: i64) -> DbResult<Option<usize>> {
        let course = sqlx::query_as::<_, CourseOutlineRow>(
            "SELECT id, outline FROM courses WHERE id = $1",
        )
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course.map(|c| c.chapter_count()))
    }
}
