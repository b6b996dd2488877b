//! Configuration types for auth service

use std::time::Duration;

use crate::crypto::SigningKey;
use crate::AuthError;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for token signing (at least 32 bytes)
    pub jwt_secret: String,
    /// Token lifetime
    pub token_ttl: Duration,
    /// bcrypt cost for new password hashes
    pub password_cost: u32,
}

impl AuthConfig {
    /// Default token lifetime (72 hours)
    pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(72 * 60 * 60);

    /// Longest accepted token lifetime (one year)
    pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

    /// Create a new auth config with default lifetime and hashing cost
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: Self::DEFAULT_TOKEN_TTL,
            password_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Create a new auth config, rejecting secrets too short to sign with
    pub fn try_new(jwt_secret: impl Into<String>) -> Result<Self, AuthError> {
        let config = Self::new(jwt_secret);
        SigningKey::new(&config.jwt_secret)
            .map_err(|e| AuthError::Configuration(e.to_string()))?;
        Ok(config)
    }

    /// Set token lifetime
    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    /// Set bcrypt cost (4..=31)
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("password_cost", &self.password_cost)
            .finish()
    }
}
