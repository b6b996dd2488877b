//! Account service - ties together registration, login and session checks

use campus_db::{AccountRepository, CreateAccount, DbError};
use campus_types::{Role, UserId};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::{
    config::AuthConfig,
    crypto::SigningKey,
    guard::{AuthenticatedUser, SessionGuard},
    issuer::{IssuedToken, TokenIssuer},
    password::{hash_password, verify_password},
    token::TokenCodec,
    AuthError,
};

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub role: Role,
    pub username: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
}

/// Authentication service
///
/// Provides unified interface for:
/// - Registration and password login
/// - Token issuing (one live session per account)
/// - Session validation and logout-everywhere
pub struct AccountService<R: AccountRepository> {
    config: AuthConfig,
    issuer: TokenIssuer<R>,
    guard: SessionGuard<R>,
    repo: Arc<R>,
}

impl<R: AccountRepository> AccountService<R> {
    /// Create a new account service
    ///
    /// # Errors
    /// Returns `Configuration` if the signing secret is shorter than 32 bytes.
    pub fn new(config: AuthConfig, repo: Arc<R>) -> Result<Self, AuthError> {
        let key = SigningKey::new(&config.jwt_secret)
            .map_err(|e| AuthError::Configuration(e.to_string()))?;
        let codec = TokenCodec::new(&key);

        Ok(Self {
            issuer: TokenIssuer::new(codec.clone(), config.token_ttl, Arc::clone(&repo)),
            guard: SessionGuard::new(codec, Arc::clone(&repo)),
            repo,
            config,
        })
    }

    pub fn issuer(&self) -> &TokenIssuer<R> {
        &self.issuer
    }

    pub fn guard(&self) -> &SessionGuard<R> {
        &self.guard
    }

    // =========================================================================
    // Session Validation
    // =========================================================================

    /// Authenticate a raw `Authorization` header value
    pub async fn authenticate(
        &self,
        header: Option<&str>,
    ) -> Result<AuthenticatedUser, AuthError> {
        self.guard.authenticate(header).await
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Register a new account. `role` defaults to student; admin is refused.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<UserId, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidInput(
                "username and password are required".to_string(),
            ));
        }

        let role = match role.map(str::trim).filter(|r| !r.is_empty()) {
            None => Role::default(),
            Some(raw) => raw
                .parse::<Role>()
                .map_err(|e| AuthError::InvalidInput(e.to_string()))?,
        };
        if !role.self_assignable() {
            return Err(AuthError::RoleNotAllowed(role.to_string()));
        }

        let password_hash = hash_password(password.to_string(), self.config.password_cost).await?;

        let account = self
            .repo
            .create(CreateAccount {
                username: username.to_string(),
                password_hash,
                role: role.to_string(),
            })
            .await
            .map_err(|e| match e {
                DbError::UniqueViolation => AuthError::UsernameTaken,
                other => AuthError::from(other),
            })?;

        tracing::info!(user_id = account.id, %role, "Registered account");
        Ok(UserId(account.id))
    }

    /// Verify a password and issue a token, superseding any earlier session
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidInput(
                "username and password are required".to_string(),
            ));
        }

        let Some(account) = self.repo.find_by_username(username).await? else {
            tracing::debug!("Login for unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password.to_string(), account.password_hash.clone()).await? {
            tracing::debug!(user_id = account.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let role: Role = account.role.parse().map_err(|_| {
            tracing::error!(user_id = account.id, role = %account.role, "Stored role is invalid");
            AuthError::Internal("account has an invalid role".to_string())
        })?;

        let user_id = UserId(account.id);
        let IssuedToken {
            token, expires_at, ..
        } = self.issuer.issue(user_id, role).await?;

        Ok(LoginOutcome {
            token,
            role,
            username: account.username,
            user_id,
            expires_at,
        })
    }

    /// Invalidate every outstanding token for the account
    pub async fn logout_everywhere(&self, user_id: UserId) -> Result<(), AuthError> {
        self.issuer.revoke_all(user_id).await.map(|_| ())
    }

    /// Create the admin account, or restore its role and reset its password
    pub async fn bootstrap_admin(&self, username: &str, password: &str) -> Result<UserId, AuthError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::Configuration(
                "admin username and password must be non-empty".to_string(),
            ));
        }

        let password_hash = hash_password(password.to_string(), self.config.password_cost).await?;
        let account = self.repo.upsert_admin(username.trim(), &password_hash).await?;

        tracing::info!(user_id = account.id, "Admin account ready");
        Ok(UserId(account.id))
    }
}

impl<R: AccountRepository> std::fmt::Debug for AccountService<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
