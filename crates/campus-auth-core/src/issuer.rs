//! Token issuing
//!
//! Issuing a token is also the invalidation step: the account's session
//! version is bumped first and the new value is signed into the token, so
//! every token minted earlier stops matching the store.

use campus_db::AccountRepository;
use campus_types::{Role, UserId};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::sync::Arc;
use std::time::Duration;

use crate::token::{TokenClaims, TokenCodec};
use crate::AuthError;

/// A freshly minted credential
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Signed token for the `Authorization: Bearer` header
    pub token: String,
    /// Session version embedded in the token
    pub version: i64,
    pub expires_at: DateTime<Utc>,
}

/// Mints versioned tokens
pub struct TokenIssuer<R: AccountRepository> {
    codec: TokenCodec,
    ttl: Duration,
    repo: Arc<R>,
}

impl<R: AccountRepository> TokenIssuer<R> {
    pub fn new(codec: TokenCodec, ttl: Duration, repo: Arc<R>) -> Self {
        Self { codec, ttl, repo }
    }

    /// Bump the account's session version and sign a token carrying it.
    ///
    /// The bump must be durable before a token exists, so a store failure
    /// aborts issuing.
    pub async fn issue(&self, user_id: UserId, role: Role) -> Result<IssuedToken, AuthError> {
        // Resolve the expiry first so an unusable TTL never retires the live session
        let now = Utc::now();
        let expires_at = self.expiry_from(now)?;

        let version = self
            .repo
            .bump_session_version(user_id.0)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let claims = TokenClaims {
            user_id: user_id.0,
            role: role.to_string(),
            version: Some(version),
            exp: expires_at.timestamp(),
            iat: Some(now.timestamp()),
        };
        let token = self.codec.sign(&claims)?;

        tracing::debug!(user_id = %user_id, version, "Issued session token");

        Ok(IssuedToken {
            token,
            version,
            expires_at,
        })
    }

    fn expiry_from(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, AuthError> {
        i64::try_from(self.ttl.as_secs())
            .ok()
            .and_then(ChronoDuration::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                tracing::error!(ttl = ?self.ttl, "Token lifetime out of range");
                AuthError::Internal("token lifetime out of range".to_string())
            })
    }

    /// Bump the session version without issuing anything, retiring every
    /// outstanding token for the account. Returns the new version.
    pub async fn revoke_all(&self, user_id: UserId) -> Result<i64, AuthError> {
        let version = self
            .repo
            .bump_session_version(user_id.0)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        tracing::info!(user_id = %user_id, version, "Revoked all sessions");
        Ok(version)
    }
}

impl<R: AccountRepository> std::fmt::Debug for TokenIssuer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
