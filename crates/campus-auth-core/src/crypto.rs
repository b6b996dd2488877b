//! Signing key material
//!
//! Tokens are HS256-signed; the shared secret is validated once here so every
//! codec built from it can assume a usable key.

use jsonwebtoken::{DecodingKey, EncodingKey};
use std::sync::Arc;

/// Validated HMAC secret for token signing.
#[derive(Clone)]
pub struct SigningKey {
    key_bytes: Arc<[u8]>,
}

impl SigningKey {
    /// Minimum allowed key length in bytes (256 bits)
    pub const MIN_KEY_LENGTH: usize = 32;

    /// Create a new signing key from bytes.
    ///
    /// # Errors
    /// Returns error if key is too short (less than 32 bytes).
    pub fn new(key: impl AsRef<[u8]>) -> Result<Self, SigningKeyError> {
        let key_bytes = key.as_ref();
        if key_bytes.len() < Self::MIN_KEY_LENGTH {
            return Err(SigningKeyError::KeyTooShort {
                actual: key_bytes.len(),
                minimum: Self::MIN_KEY_LENGTH,
            });
        }
        Ok(Self {
            key_bytes: Arc::from(key_bytes),
        })
    }

    pub fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(&self.key_bytes)
    }

    pub fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(&self.key_bytes)
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey")
            .field("key_length", &self.key_bytes.len())
            .finish_non_exhaustive()
    }
}

/// Errors that can occur when creating a signing key
#[derive(Debug, Clone, thiserror::Error)]
pub enum SigningKeyError {
    #[error("signing key too short: got {actual} bytes, need at least {minimum}")]
    KeyTooShort { actual: usize, minimum: usize },
}
