//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Account row from the database
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    /// Bumped on every login and logout-everywhere; never decremented
    pub session_version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Enrollment row from the database
#[derive(Debug, Clone, FromRow)]
pub struct EnrollmentRow {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub progress: f64,
    pub is_finished: bool,
    /// Serialized progress state, decoded by the progress core
    pub state: String,
    /// Optimistic concurrency counter for progress writes
    pub revision: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The slice of a course row the progress engine needs
#[derive(Debug, Clone, FromRow)]
pub struct CourseOutlineRow {
    pub id: i64,
    pub outline: Option<String>,
}

impl CourseOutlineRow {
    /// Number of chapters in the outline.
    ///
    /// The outline is a JSON array of chapter descriptors; a missing or
    /// unparsable outline has no chapters.
    pub fn chapter_count(&self) -> usize {
        outline_chapter_count(self.outline.as_deref().unwrap_or_default())
    }
}

/// Count the entries of a JSON-array outline
pub fn outline_chapter_count(outline: &str) -> usize {
    if outline.trim().is_empty() {
        return 0;
    }
    match serde_json::from_str::<Vec<serde_json::Value>>(outline) {
        Ok(chapters) => chapters.len(),
        Err(e) => {
            tracing::warn!(error = %e, "Unparsable course outline, counting zero chapters");
            0
        }
    }
}
