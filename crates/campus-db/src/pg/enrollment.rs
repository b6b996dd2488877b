//! PostgreSQL enrollment repository implementation

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::DbResult;
use crate::models::EnrollmentRow;
use crate::repo::{EnrollmentRepository, ProgressWrite};

/// PostgreSQL enrollment repository
#[derive(Clone)]
pub struct PgEnrollmentRepository {
    pool: PgPool,
}

impl PgEnrollmentRepository {
    /// Create a new enrollment repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentRepository for PgEnrollmentRepository {
    async fn find(&self, user_id: i64, course_id: i64) -> DbResult<Option<EnrollmentRow>> {
        let enrollment = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT id, user_id, course_id, progress, is_finished, state, revision,
                   created_at, updated_at
            FROM enrollments
            WHERE user_id = $1 AND course_id = $2
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(enrollment)
    }

    async fn find_by_user_id(&self, user_id: i64) -> DbResult<Vec<EnrollmentRow>> {
        let enrollments = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT id, user_id, course_id, progress, is_finished, state, revision,
                   created_at, updated_at
            FROM enrollments
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(enrollments)
    }

    async fn create(&self, user_id: i64, course_id: i64) -> DbResult<EnrollmentRow> {
        let row = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            INSERT INTO enrollments (user_id, course_id)
            VALUES ($1, $2)
            RETURNING id, user_id, course_id, progress, is_finished, state, revision,
                      created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn write_progress(&self, write: ProgressWrite) -> DbResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE enrollments
            SET state = $1, progress = $2, is_finished = $3,
                revision = revision + 1, updated_at = NOW()
            WHERE id = $4 AND revision = $5
            "#,
        )
        .bind(&write.state)
        .bind(write.progress)
        .bind(write.is_finished)
        .bind(write.enrollment_id)
        .bind(write.expected_revision)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
