//! Token claims and HS256 encoding/verification

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::crypto::SigningKey;
use crate::AuthError;

/// Claims carried by every credential
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Account ID
    pub user_id: i64,
    /// Account role at issue time
    pub role: String,
    /// Session version at issue time. Absent on tokens minted before
    /// versioning existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    /// Expiration timestamp (Unix seconds)
    pub exp: i64,
    /// Issued at timestamp (Unix seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl TokenClaims {
    /// Session version to compare against the store; legacy tokens count as 0
    pub fn effective_version(&self) -> i64 {
        self.version.unwrap_or(0)
    }

    /// Check if the token is expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Signs and verifies [`TokenClaims`] as compact HS256 JWTs
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(key: &SigningKey) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: key.encoding_key(),
            decoding_key: key.decoding_key(),
            validation,
        }
    }

    /// Sign claims into a token string
    pub fn sign(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign token: {}", e);
            AuthError::Internal("Failed to sign token".to_string())
        })
    }

    /// Verify signature and expiry, returning the claims.
    ///
    /// Every failure, whatever the cause, is `InvalidOrExpiredToken`.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!("Token validation failed: {}", e);
            AuthError::InvalidOrExpiredToken
        })?;

        // jsonwebtoken already checks exp; keep the check independent of its leeway
        if data.claims.is_expired() {
            return Err(AuthError::InvalidOrExpiredToken);
        }

        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}
