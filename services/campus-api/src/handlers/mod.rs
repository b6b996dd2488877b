//! HTTP handlers

mod auth;
mod health;
mod progress;

pub use auth::{login, logout, me, register};
pub use health::{health, ready};
pub use progress::{enroll, get_progress, my_courses, update_progress};
