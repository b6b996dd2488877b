//! API request/response types

use serde::{Deserialize, Serialize};

use crate::{CourseId, EventParseError, ProgressEvent, ProgressState, Role, UserId};

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Accounts
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    /// Defaults to `student` when omitted or empty
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
    pub username: String,
    pub user_id: UserId,
    /// RFC 3339 expiry of `token`
    pub expires_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub user_id: UserId,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
}

// ============================================================================
// Enrollment and progress
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct EnrollRequest {
    pub course_id: CourseId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentSummary {
    pub course_id: CourseId,
    pub progress: f64,
    pub is_finished: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentList {
    pub data: Vec<EnrollmentSummary>,
}

/// `{course_id, type: "video"|"chapter", index?}`
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressUpdateRequest {
    pub course_id: CourseId,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub index: Option<i64>,
}

impl ProgressUpdateRequest {
    /// Interpret the request as a completion event.
    ///
    /// `index` is ignored for video events.
    pub fn event(&self) -> Result<ProgressEvent, EventParseError> {
        match self.kind.as_str() {
            "video" => Ok(ProgressEvent::VideoCompleted),
            "chapter" => {
                let index = self.index.ok_or(EventParseError::MissingIndex)?;
                let index =
                    u32::try_from(index).map_err(|_| EventParseError::IndexOutOfRange(index))?;
                Ok(ProgressEvent::ChapterCompleted(index))
            }
            other => Err(EventParseError::UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressDetails {
    pub video_done: bool,
    pub chapters: Vec<u32>,
}

impl From<&ProgressState> for ProgressDetails {
    fn from(state: &ProgressState) -> Self {
        Self {
            video_done: state.video_done,
            chapters: state.chapters.iter().copied().collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub progress: f64,
    pub details: ProgressDetails,
}
