//! Session validation for inbound requests

use campus_db::AccountRepository;
use campus_types::{Role, UserId};
use std::sync::Arc;

use crate::token::TokenCodec;
use crate::AuthError;

/// Identity established for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub role: Role,
}

/// Extract the token from an `Authorization` header value.
///
/// Accepts exactly `Bearer <token>`: case-sensitive scheme, one space, and a
/// token without further whitespace.
pub fn bearer_token(header: &str) -> Result<&str, AuthError> {
    let (scheme, token) = header.split_once(' ').ok_or(AuthError::MalformedToken)?;
    if scheme != "Bearer" || token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthError::MalformedToken);
    }
    Ok(token)
}

/// Validates credentials against signature, expiry and the current session version
pub struct SessionGuard<R: AccountRepository> {
    codec: TokenCodec,
    repo: Arc<R>,
}

impl<R: AccountRepository> SessionGuard<R> {
    pub fn new(codec: TokenCodec, repo: Arc<R>) -> Self {
        Self { codec, repo }
    }

    /// Authenticate a raw `Authorization` header value
    pub async fn authenticate(
        &self,
        header: Option<&str>,
    ) -> Result<AuthenticatedUser, AuthError> {
        let header = header
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or(AuthError::AuthHeaderMissing)?;

        let token = bearer_token(header)?;
        self.authenticate_token(token).await
    }

    /// Authenticate a bare token (already stripped of its `Bearer ` prefix)
    pub async fn authenticate_token(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.codec.verify(token)?;

        let role: Role = claims.role.parse().map_err(|_| {
            tracing::debug!(role = %claims.role, "Token carries unknown role");
            AuthError::MalformedToken
        })?;

        let presented = claims.effective_version();
        let current = self.repo.session_version(claims.user_id).await?;

        match current {
            Some(current) if current == presented => Ok(AuthenticatedUser {
                user_id: UserId(claims.user_id),
                role,
            }),
            Some(current) => {
                tracing::debug!(
                    user_id = claims.user_id,
                    presented,
                    current,
                    "Session superseded by a newer login"
                );
                Err(AuthError::SessionSuperseded)
            }
            None => {
                tracing::debug!(user_id = claims.user_id, "Token for missing account");
                Err(AuthError::SessionSuperseded)
            }
        }
    }
}

impl<R: AccountRepository> std::fmt::Debug for SessionGuard<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGuard").finish_non_exhaustive()
    }
}
