//! Account handlers (register, login, logout, me)

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::instrument;

use campus_types::{
    LoginRequest, LoginResponse, LogoutResponse, MeResponse, MessageResponse, RegisterRequest,
};

use crate::error::{ApiError, ApiResult};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/v1/register
#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let user_id = state
        .auth
        .register(&req.username, &req.password, req.role.as_deref())
        .await?;

    tracing::debug!(user_id = %user_id, "Registration complete");
    Ok(Json(MessageResponse {
        message: "registered".to_string(),
    }))
}

/// POST /api/v1/login
///
/// Issues a fresh token and retires every token issued before it.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let outcome = state.auth.login(&req.username, &req.password).await?;

    tracing::info!(user_id = %outcome.user_id, role = %outcome.role, "Login");
    Ok(Json(LoginResponse {
        token: outcome.token,
        role: outcome.role,
        username: outcome.username,
        user_id: outcome.user_id,
        expires_at: outcome.expires_at.to_rfc3339(),
    }))
}

/// POST /api/v1/logout
///
/// Logs the account out on every device.
#[instrument(skip(state), fields(user_id = %user.user_id))]
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<LogoutResponse>> {
    state.auth.logout_everywhere(user.user_id).await?;
    Ok(Json(LogoutResponse { success: true }))
}

/// GET /api/v1/me
pub async fn me(user: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: user.user_id,
        role: user.role,
    })
}
