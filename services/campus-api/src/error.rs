//! Error types for the campus API service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use campus_auth_core::AuthError;
use campus_progress_core::ProgressError;
use campus_types::ErrorBody;

/// Body message for every failed credential check
const UNAUTHENTICATED: &str = "unauthenticated";

/// API error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Progress(#[from] ProgressError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        let code = match self {
            Self::Auth(e) => e.status_code(),
            Self::Progress(e) => e.status_code(),
            Self::BadRequest(_) => 400,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Message safe to show the caller
    fn public_message(&self) -> String {
        match self {
            Self::Auth(e) if e.is_unauthenticated() => UNAUTHENTICATED.to_string(),
            Self::Auth(AuthError::StoreUnavailable(_))
            | Self::Progress(ProgressError::StoreUnavailable(_)) => {
                "service temporarily unavailable".to_string()
            }
            Self::Auth(AuthError::Configuration(_) | AuthError::Internal(_))
            | Self::Progress(ProgressError::Internal(_)) => "internal error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            Self::Auth(e) if e.is_unauthenticated() => {
                tracing::debug!(reason = %e, "Request not authenticated");
            }
            _ if status.is_server_error() => {
                tracing::error!(error = ?self, "Internal API error");
            }
            _ => {}
        }

        (status, Json(ErrorBody::new(self.public_message()))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
