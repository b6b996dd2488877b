//! Campus Auth Core - Authentication business logic
//!
//! Single-live-session authentication: every issued token embeds the
//! account's session version, and a token is accepted only while that version
//! is still current. Logging in (or logging out everywhere) bumps the version,
//! which retires every earlier token without a server-side session table.

pub mod config;
pub mod crypto;
pub mod error;
pub mod guard;
pub mod issuer;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use crypto::{SigningKey, SigningKeyError};
pub use error::AuthError;
pub use guard::{bearer_token, AuthenticatedUser, SessionGuard};
pub use issuer::{IssuedToken, TokenIssuer};
pub use service::{AccountService, LoginOutcome};
pub use token::{TokenClaims, TokenCodec};
