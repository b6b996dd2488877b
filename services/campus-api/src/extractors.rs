//! Axum extractors for authentication

use axum::extract::{FromRef, FromRequestParts};
use axum::http::header;
use axum::http::request::Parts;

use campus_auth_core::AuthError;
use campus_types::{Role, UserId};

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller, established by the session guard
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: UserId,
    pub role: Role,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .map(|value| value.to_str().map_err(|_| AuthError::MalformedToken))
            .transpose()?;

        let user = app_state.auth.authenticate(header).await?;

        Ok(Self {
            user_id: user.user_id,
            role: user.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request, StatusCode};
    use axum::response::IntoResponse;

    fn parts_with(authorization: Option<HeaderValue>) -> Parts {
        let mut request = Request::builder().uri("/api/v1/me");
        if let Some(value) = authorization {
            request = request.header(header::AUTHORIZATION, value);
        }
        request.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_rejected_headers_are_unauthenticated() {
        let state = AppState::for_tests();
        let headers = [
            None,
            Some(HeaderValue::from_bytes(b"Bearer \xff").unwrap()),
            Some(HeaderValue::from_static("Basic dXNlcjpwdw==")),
            Some(HeaderValue::from_static("Bearer not.a.jwt")),
        ];

        for value in headers {
            let mut parts = parts_with(value.clone());
            let err = AuthUser::from_request_parts(&mut parts, &state)
                .await
                .unwrap_err();
            assert!(
                matches!(&err, ApiError::Auth(e) if e.is_unauthenticated()),
                "{value:?} gave {err:?}"
            );
            assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
        }
    }
}
