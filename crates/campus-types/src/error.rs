//! Common error types

use thiserror::Error;

/// Errors turning a progress-update request into a [`crate::ProgressEvent`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventParseError {
    /// `type` was neither `video` nor `chapter`
    #[error("unknown progress type: {0}")]
    UnknownKind(String),

    /// A chapter event without an `index`
    #[error("chapter index is required")]
    MissingIndex,

    /// Negative or larger than any outline could be
    #[error("chapter index out of range: {0}")]
    IndexOutOfRange(i64),
}
