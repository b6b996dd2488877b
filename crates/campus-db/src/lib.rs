//! Campus DB - Database abstractions
//!
//! SQLx-based database layer for campus services. The repository traits in
//! [`repo`] are the seams the auth and progress cores depend on; [`pg`] holds
//! the PostgreSQL implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use campus_db::{create_pool_with_options, run_migrations, PoolOptions, Repositories};
//!
//! let pool = create_pool_with_options("postgres://localhost/campus", PoolOptions::default()).await?;
//! run_migrations(&pool).await?;
//! let repos = Repositories::new(pool);
//!
//! let account = repos.accounts.find_by_username("ada").await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{
    applied_schema_version, create_pool_with_options, expected_schema_version, run_migrations,
    DbPool, PoolOptions,
};
pub use repo::*;
