//! Common test utilities for campus-auth-core integration tests

pub mod mock_repos;

#[allow(unused_imports)]
pub use mock_repos::{FailingAccountRepository, MockAccountRepository};

use campus_auth_core::{AccountService, AuthConfig};
use std::sync::Arc;

/// 32+ byte secret shared by every test service
#[allow(dead_code)]
pub const TEST_SECRET: &str = "campus-test-secret-with-enough-bytes";

/// Account service over an in-memory store, with a cheap bcrypt cost
#[allow(dead_code)]
pub fn test_service() -> (AccountService<MockAccountRepository>, MockAccountRepository) {
    let repo = MockAccountRepository::new();
    let config = AuthConfig::new(TEST_SECRET).with_password_cost(4);
    let service = AccountService::new(config, Arc::new(repo.clone())).unwrap();
    (service, repo)
}
