//! Progress engine - persists scored progress for enrollments

use campus_db::{CourseRepository, DbError, EnrollmentRepository, EnrollmentRow, ProgressWrite};
use campus_types::{CourseId, ProgressEvent, ProgressState, UserId};
use std::sync::Arc;

use crate::{
    config::ProgressConfig,
    score::{apply_event, validate_event},
    state::{decode_state, encode_state},
    ProgressError,
};

/// Stored progress of one enrollment
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSnapshot {
    pub course_id: CourseId,
    pub progress: f64,
    pub is_finished: bool,
    pub state: ProgressState,
}

impl From<&EnrollmentRow> for ProgressSnapshot {
    fn from(row: &EnrollmentRow) -> Self {
        Self {
            course_id: CourseId(row.course_id),
            progress: row.progress,
            is_finished: row.is_finished,
            state: decode_state(&row.state),
        }
    }
}

/// Progress engine
///
/// Records completion events against enrollments. Every write is a
/// compare-and-swap on the enrollment's revision; a lost race reloads the
/// enrollment and reapplies the event.
pub struct ProgressEngine<E: EnrollmentRepository, C: CourseRepository> {
    config: ProgressConfig,
    enrollments: Arc<E>,
    courses: Arc<C>,
}

impl<E: EnrollmentRepository, C: CourseRepository> ProgressEngine<E, C> {
    /// Create a new progress engine
    pub fn new(config: ProgressConfig, enrollments: Arc<E>, courses: Arc<C>) -> Self {
        Self {
            config,
            enrollments,
            courses,
        }
    }

    // =========================================================================
    // Progress
    // =========================================================================

    /// Apply a completion event to the user's enrollment and persist the result
    pub async fn record(
        &self,
        user_id: UserId,
        course_id: CourseId,
        event: ProgressEvent,
    ) -> Result<ProgressSnapshot, ProgressError> {
        let total_chapters = self.chapter_count(course_id).await?;
        validate_event(event, total_chapters)?;

        for attempt in 1..=self.config.max_attempts {
            let enrollment = self.load(user_id, course_id).await?;
            let outcome = apply_event(decode_state(&enrollment.state), event, total_chapters)?;

            let up_to_date = !outcome.changed
                && outcome.score == enrollment.progress
                && outcome.finished == enrollment.is_finished;
            if up_to_date {
                tracing::debug!(
                    user_id = %user_id,
                    course_id = %course_id,
                    %event,
                    "Progress event already applied"
                );
                return Ok(ProgressSnapshot {
                    course_id,
                    progress: outcome.score,
                    is_finished: outcome.finished,
                    state: outcome.state,
                });
            }

            let written = self
                .enrollments
                .write_progress(ProgressWrite {
                    enrollment_id: enrollment.id,
                    expected_revision: enrollment.revision,
                    state: encode_state(&outcome.state)?,
                    progress: outcome.score,
                    is_finished: outcome.finished,
                })
                .await?;

            if written {
                tracing::debug!(
                    user_id = %user_id,
                    course_id = %course_id,
                    %event,
                    progress = outcome.score,
                    finished = outcome.finished,
                    "Recorded progress"
                );
                return Ok(ProgressSnapshot {
                    course_id,
                    progress: outcome.score,
                    is_finished: outcome.finished,
                    state: outcome.state,
                });
            }

            tracing::warn!(
                enrollment_id = enrollment.id,
                attempt,
                "Concurrent progress update, retrying"
            );
        }

        tracing::warn!(
            user_id = %user_id,
            course_id = %course_id,
            attempts = self.config.max_attempts,
            "Giving up on contended progress update"
        );
        Err(ProgressError::Conflict)
    }

    /// Current stored progress, without changing anything
    pub async fn snapshot(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<ProgressSnapshot, ProgressError> {
        let enrollment = self.load(user_id, course_id).await?;
        Ok(ProgressSnapshot::from(&enrollment))
    }

    // =========================================================================
    // Enrollments
    // =========================================================================

    /// Enroll a user in a course with empty progress
    pub async fn enroll(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<ProgressSnapshot, ProgressError> {
        self.chapter_count(course_id).await?;

        let enrollment = self
            .enrollments
            .create(user_id.0, course_id.0)
            .await
            .map_err(|e| match e {
                DbError::UniqueViolation => ProgressError::AlreadyEnrolled,
                other => ProgressError::from(other),
            })?;

        tracing::info!(user_id = %user_id, course_id = %course_id, "Enrolled");
        Ok(ProgressSnapshot::from(&enrollment))
    }

    /// All of a user's enrollments with their progress
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<ProgressSnapshot>, ProgressError> {
        let rows = self.enrollments.find_by_user_id(user_id.0).await?;
        Ok(rows.iter().map(ProgressSnapshot::from).collect())
    }

    async fn load(&self, user_id: UserId, course_id: CourseId) -> Result<EnrollmentRow, ProgressError> {
        self.enrollments
            .find(user_id.0, course_id.0)
            .await?
            .ok_or(ProgressError::EnrollmentNotFound)
    }

    async fn chapter_count(&self, course_id: CourseId) -> Result<usize, ProgressError> {
        self.courses
            .chapter_count(course_id.0)
            .await?
            .ok_or(ProgressError::CourseNotFound)
    }
}

impl<E: EnrollmentRepository, C: CourseRepository> std::fmt::Debug for ProgressEngine<E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
