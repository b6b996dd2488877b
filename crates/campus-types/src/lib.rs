//! Campus Types - Shared domain types
//!
//! This crate contains domain types used across campus services:
//! - Account and course identifiers
//! - Account roles
//! - Progress state and completion events
//! - HTTP request/response payloads

pub mod api;
pub mod error;
pub mod ids;
pub mod progress;
pub mod role;

pub use api::*;
pub use error::*;
pub use ids::*;
pub use progress::*;
pub use role::*;
