//! Auth errors

use thiserror::Error;

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// No Authorization header, or an empty one
    #[error("authorization header missing")]
    AuthHeaderMissing,

    /// Header is not `Bearer <token>`, or the claims are not understood
    #[error("malformed token")]
    MalformedToken,

    /// Bad signature, undecodable token, or expiry elapsed
    #[error("invalid or expired token")]
    InvalidOrExpiredToken,

    /// A newer login replaced this session, or the account is gone
    #[error("session superseded")]
    SessionSuperseded,

    /// Account not found
    #[error("account not found")]
    AccountNotFound,

    /// Unknown username or wrong password
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Username already registered
    #[error("username already taken")]
    UsernameTaken,

    /// Role cannot be chosen at registration
    #[error("role not allowed: {0}")]
    RoleNotAllowed(String),

    /// Invalid registration or login input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Credential store unreachable or failing
    #[error("credential store unavailable: {0}")]
    StoreUnavailable(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Whether this failure means "the caller is not authenticated".
    ///
    /// Callers must not tell these apart in responses.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            Self::AuthHeaderMissing
                | Self::MalformedToken
                | Self::InvalidOrExpiredToken
                | Self::SessionSuperseded
        )
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::AuthHeaderMissing
            | Self::MalformedToken
            | Self::InvalidOrExpiredToken
            | Self::SessionSuperseded
            | Self::InvalidCredentials => 401,
            Self::RoleNotAllowed(_) => 403,
            Self::AccountNotFound => 404,
            Self::InvalidInput(_) => 400,
            Self::UsernameTaken => 409,
            Self::StoreUnavailable(_) => 503,
            Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }
}

impl From<campus_db::DbError> for AuthError {
    fn from(err: campus_db::DbError) -> Self {
        tracing::error!("Credential store error: {}", err);
        Self::StoreUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_failures_share_status() {
        let failures = [
            AuthError::AuthHeaderMissing,
            AuthError::MalformedToken,
            AuthError::InvalidOrExpiredToken,
            AuthError::SessionSuperseded,
        ];
        for failure in failures {
            assert!(failure.is_unauthenticated());
            assert_eq!(failure.status_code(), 401);
        }
    }

    #[test]
    fn test_store_failure_is_not_unauthenticated() {
        let err = AuthError::from(campus_db::DbError::Sqlx(sqlx::Error::PoolTimedOut));
        assert!(matches!(err, AuthError::StoreUnavailable(_)));
        assert!(!err.is_unauthenticated());
        assert_eq!(err.status_code(), 503);
    }
}
