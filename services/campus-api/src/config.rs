//! Configuration for the campus API service.

use campus_auth_core::AuthConfig;
use campus_progress_core::ProgressConfig;
use std::time::Duration;

/// Credentials for the admin account created at startup
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Campus API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,

    /// Database URL
    pub database_url: String,

    /// Database pool size
    pub database_max_connections: u32,

    /// Auth core configuration
    pub auth: AuthConfig,

    /// Progress engine configuration
    pub progress: ProgressConfig,

    /// Request timeout for API routes
    pub request_timeout: Duration,

    /// Admin account to ensure at startup, if configured
    pub admin: Option<AdminCredentials>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        // Database
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let database_max_connections: u32 = var_or("DATABASE_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|_| ConfigError::Invalid("DATABASE_MAX_CONNECTIONS"))?;

        // Server
        let http_port = var_or("HTTP_PORT", "8080")
            .parse()
            .map_err(|_| ConfigError::Invalid("HTTP_PORT"))?;

        // Token signing secret (minimum 32 bytes)
        let jwt_secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;

        // Token lifetime (default 72 hours)
        let token_ttl_hours: u64 = var_or("TOKEN_TTL_HOURS", "72")
            .parse()
            .map_err(|_| ConfigError::Invalid("TOKEN_TTL_HOURS"))?;
        let token_ttl = token_ttl_hours
            .checked_mul(3600)
            .map(Duration::from_secs)
            .filter(|ttl| !ttl.is_zero() && *ttl <= AuthConfig::MAX_TOKEN_TTL)
            .ok_or(ConfigError::Invalid("TOKEN_TTL_HOURS"))?;

        // Request timeout (default 30 seconds)
        let request_timeout_secs: u64 = var_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECS"))?;

        // Progress write attempts (default 8)
        let progress_max_attempts: u32 = var_or("PROGRESS_MAX_ATTEMPTS", "8")
            .parse()
            .map_err(|_| ConfigError::Invalid("PROGRESS_MAX_ATTEMPTS"))?;

        // Admin bootstrap, only when both halves are present
        let admin = match (lookup("ADMIN_USERNAME"), lookup("ADMIN_PASSWORD")) {
            (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
                Some(AdminCredentials { username, password })
            }
            _ => None,
        };

        let auth = AuthConfig::try_new(jwt_secret)
            .map_err(|e| ConfigError::AuthConfig(e.to_string()))?
            .with_token_ttl(token_ttl);

        Ok(Self {
            http_port,
            database_url,
            database_max_connections,
            auth,
            progress: ProgressConfig::default().with_max_attempts(progress_max_attempts),
            request_timeout: Duration::from_secs(request_timeout_secs),
            admin,
        })
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Auth config error: {0}")]
    AuthConfig(String),
}
