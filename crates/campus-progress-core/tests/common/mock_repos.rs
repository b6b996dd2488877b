//! Mock repositories for testing

use async_trait::async_trait;
use campus_db::{
    CourseRepository, DbError, DbResult, EnrollmentRepository, EnrollmentRow, ProgressWrite,
};
use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory enrollment repository for testing
#[derive(Default, Clone)]
pub struct MockEnrollmentRepository {
    enrollments: Arc<DashMap<i64, EnrollmentRow>>,
    by_pair: Arc<DashMap<(i64, i64), i64>>,
    next_id: Arc<AtomicI64>,
    /// Writes still to be beaten by a simulated concurrent writer
    contended_writes: Arc<AtomicUsize>,
    /// Writes that were applied
    applied_writes: Arc<AtomicUsize>,
    unavailable: Arc<AtomicBool>,
}

impl MockEnrollmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` progress writes lose their compare-and-swap, as if
    /// another request had written in between
    #[allow(dead_code)]
    pub fn contend_next_writes(&self, n: usize) {
        self.contended_writes.store(n, Ordering::SeqCst);
    }

    /// Fail every call from now on
    #[allow(dead_code)]
    pub fn set_unavailable(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }

    #[allow(dead_code)]
    pub fn applied_writes(&self) -> usize {
        self.applied_writes.load(Ordering::SeqCst)
    }

    /// Overwrite the raw stored state of an enrollment
    #[allow(dead_code)]
    pub fn set_raw_state(&self, user_id: i64, course_id: i64, state: &str) {
        if let Some(id) = self.by_pair.get(&(user_id, course_id)).map(|id| *id) {
            if let Some(mut row) = self.enrollments.get_mut(&id) {
                row.state = state.to_string();
            }
        }
    }

    #[allow(dead_code)]
    pub fn row(&self, user_id: i64, course_id: i64) -> Option<EnrollmentRow> {
        let id = *self.by_pair.get(&(user_id, course_id))?;
        self.enrollments.get(&id).map(|r| r.value().clone())
    }

    fn check_available(&self) -> DbResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl EnrollmentRepository for MockEnrollmentRepository {
    async fn find(&self, user_id: i64, course_id: i64) -> DbResult<Option<EnrollmentRow>> {
        self.check_available()?;
        Ok(self
            .by_pair
            .get(&(user_id, course_id))
            .and_then(|id| self.enrollments.get(id.value()).map(|r| r.value().clone())))
    }

    async fn find_by_user_id(&self, user_id: i64) -> DbResult<Vec<EnrollmentRow>> {
        self.check_available()?;
        let mut rows: Vec<EnrollmentRow> = self
            .enrollments
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.value().clone())
            .collect();
        rows.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(rows)
    }

    async fn create(&self, user_id: i64, course_id: i64) -> DbResult<EnrollmentRow> {
        self.check_available()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        match self.by_pair.entry((user_id, course_id)) {
            dashmap::mapref::entry::Entry::Occupied(_) => return Err(DbError::UniqueViolation),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }
        let row = EnrollmentRow {
            id,
            user_id,
            course_id,
            progress: 0.0,
            is_finished: false,
            state: String::new(),
            revision: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.enrollments.insert(id, row.clone());
        Ok(row)
    }

    async fn write_progress(&self, write: ProgressWrite) -> DbResult<bool> {
        self.check_available()?;
        let Some(mut row) = self.enrollments.get_mut(&write.enrollment_id) else {
            return Ok(false);
        };

        let contended = self
            .contended_writes
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if contended {
            // Someone else wrote first; their write bumped the revision
            row.revision += 1;
            return Ok(false);
        }

        if row.revision != write.expected_revision {
            return Ok(false);
        }

        row.state = write.state;
        row.progress = write.progress;
        row.is_finished = write.is_finished;
        row.revision += 1;
        row.updated_at = Utc::now();
        self.applied_writes.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}

/// In-memory course repository for testing
#[derive(Default, Clone)]
pub struct MockCourseRepository {
    chapters: Arc<DashMap<i64, usize>>,
}

impl MockCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a course with the given number of chapters
    #[allow(dead_code)]
    pub fn with_course(&self, course_id: i64, chapters: usize) -> &Self {
        self.chapters.insert(course_id, chapters);
        self
    }
}

#[async_trait]
impl CourseRepository for MockCourseRepository {
    async fn chapter_count(&self, course_id: i64) -> DbResult<Option<usize>> {
        Ok(self.chapters.get(&course_id).map(|c| *c))
    }
}
