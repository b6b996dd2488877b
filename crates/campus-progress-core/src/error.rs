//! Progress errors

use campus_types::EventParseError;
use thiserror::Error;

/// Progress engine errors
#[derive(Error, Debug)]
pub enum ProgressError {
    /// The user is not enrolled in the course
    #[error("enrollment not found")]
    EnrollmentNotFound,

    /// The course does not exist
    #[error("course not found")]
    CourseNotFound,

    /// The event could not be understood
    #[error("malformed progress event: {0}")]
    MalformedProgressEvent(String),

    /// Chapter index outside the course outline
    #[error("chapter index {index} out of range for {total} chapters")]
    InvalidChapterIndex {
        /// Reported index
        index: u32,
        /// Chapters in the outline
        total: usize,
    },

    /// The user is already enrolled in the course
    #[error("already enrolled")]
    AlreadyEnrolled,

    /// Concurrent writers kept winning; the write was not applied
    #[error("progress update conflicted with concurrent updates")]
    Conflict,

    /// Enrollment store unreachable or failing
    #[error("enrollment store unavailable: {0}")]
    StoreUnavailable(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl ProgressError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::EnrollmentNotFound | Self::CourseNotFound => 404,
            Self::MalformedProgressEvent(_) | Self::InvalidChapterIndex { .. } => 400,
            Self::AlreadyEnrolled | Self::Conflict => 409,
            Self::StoreUnavailable(_) => 503,
            Self::Internal(_) => 500,
        }
    }
}

impl From<EventParseError> for ProgressError {
    fn from(err: EventParseError) -> Self {
        Self::MalformedProgressEvent(err.to_string())
    }
}

impl From<campus_db::DbError> for ProgressError {
    fn from(err: campus_db::DbError) -> Self {
        tracing::error!("Enrollment store error: {}", err);
        Self::StoreUnavailable(err.to_string())
    }
}
