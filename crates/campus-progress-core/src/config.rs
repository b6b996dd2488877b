//! Progress engine configuration

/// Progress engine configuration
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// How many times a progress write is attempted before giving up with
    /// `Conflict` when concurrent writers keep winning the race
    pub max_attempts: u32,
}

impl ProgressConfig {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 8;

    /// Set the write attempt limit (at least one attempt is always made)
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }
}
