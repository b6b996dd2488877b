//! Enrollment and progress handlers

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use tracing::instrument;

use campus_progress_core::{ProgressError, ProgressSnapshot};
use campus_types::{
    CourseId, EnrollRequest, EnrollmentList, EnrollmentSummary, MessageResponse, ProgressDetails,
    ProgressResponse, ProgressUpdateRequest,
};

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

fn progress_response(snapshot: &ProgressSnapshot) -> ProgressResponse {
    ProgressResponse {
        progress: snapshot.progress,
        details: ProgressDetails::from(&snapshot.state),
    }
}

/// POST /api/v1/enroll
#[instrument(skip(state, body), fields(user_id = %user.user_id))]
pub async fn enroll(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<EnrollRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    state.progress.enroll(user.user_id, req.course_id).await?;

    Ok(Json(MessageResponse {
        message: "enrolled".to_string(),
    }))
}

/// GET /api/v1/my-courses
#[instrument(skip(state), fields(user_id = %user.user_id))]
pub async fn my_courses(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<EnrollmentList>> {
    let snapshots = state.progress.list_for_user(user.user_id).await?;

    let data = snapshots
        .into_iter()
        .map(|s| EnrollmentSummary {
            course_id: s.course_id,
            progress: s.progress,
            is_finished: s.is_finished,
        })
        .collect();

    Ok(Json(EnrollmentList { data }))
}

/// POST /api/v1/progress
///
/// Records a completion event. Replaying an event returns the same result.
#[instrument(skip(state, body), fields(user_id = %user.user_id))]
pub async fn update_progress(
    State(state): State<AppState>,
    user: AuthUser,
    body: Result<Json<ProgressUpdateRequest>, JsonRejection>,
) -> ApiResult<Json<ProgressResponse>> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let event = req.event().map_err(ProgressError::from)?;

    let snapshot = state
        .progress
        .record(user.user_id, req.course_id, event)
        .await?;

    Ok(Json(progress_response(&snapshot)))
}

/// GET /api/v1/progress/{course_id}
#[instrument(skip(state, course_id), fields(user_id = %user.user_id))]
pub async fn get_progress(
    State(state): State<AppState>,
    user: AuthUser,
    course_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ProgressResponse>> {
    let Path(course_id) = course_id.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let snapshot = state
        .progress
        .snapshot(user.user_id, CourseId(course_id))
        .await?;

    Ok(Json(progress_response(&snapshot)))
}
