//! Campus Progress Core - Course completion tracking
//!
//! Turns discrete, possibly repeated completion events into a completion score.
//! The score is always recomputed from the accumulated [`ProgressState`] and the
//! course's chapter count, so replaying an event is a no-op and the score can
//! only grow as events arrive.
//!
//! # Example
//!
//! ```rust,ignore
//! use campus_progress_core::{ProgressConfig, ProgressEngine};
//! use campus_types::{CourseId, ProgressEvent, UserId};
//!
//! let engine = ProgressEngine::new(ProgressConfig::default(), enrollments, courses);
//!
//! engine.enroll(UserId(7), CourseId(3)).await?;
//! let snapshot = engine
//!     .record(UserId(7), CourseId(3), ProgressEvent::ChapterCompleted(0))
//!     .await?;
//! println!("{}% done", snapshot.progress);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod score;
pub mod state;

pub use config::ProgressConfig;
pub use engine::{ProgressEngine, ProgressSnapshot};
pub use error::ProgressError;
pub use score::{apply_event, compute_score, validate_event, ProgressOutcome, FULL_SCORE};
pub use state::{decode_state, encode_state};

// Re-export the state types from campus-types for convenience
pub use campus_types::{ProgressEvent, ProgressState};
