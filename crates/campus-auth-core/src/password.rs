//! Password hashing
//!
//! bcrypt is CPU-bound; both operations run on the blocking pool so they never
//! stall the async workers.

use crate::AuthError;

/// Hash a password with the given bcrypt cost
pub async fn hash_password(password: String, cost: u32) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| {
            tracing::error!("Password hashing task failed: {}", e);
            AuthError::Internal("Failed to hash password".to_string())
        })?
        .map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            AuthError::Internal("Failed to hash password".to_string())
        })
}

/// Check a password against a stored bcrypt hash.
///
/// A malformed stored hash verifies as `false`.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AuthError> {
    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| {
            tracing::error!("Password verification task failed: {}", e);
            AuthError::Internal("Failed to verify password".to_string())
        })?;

    match outcome {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::warn!("Stored password hash is unusable: {}", e);
            Ok(false)
        }
    }
}
