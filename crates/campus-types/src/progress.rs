//! Progress state and completion events

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which completion sub-events have occurred for an enrollment
///
/// State only grows: the video flag never resets and chapters are a set, so
/// applying the same event twice leaves the state unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    #[serde(default)]
    pub video_done: bool,
    #[serde(default)]
    pub chapters: BTreeSet<u32>,
}

impl ProgressState {
    /// Apply a completion event in place. Returns `true` if the state changed.
    pub fn apply(&mut self, event: ProgressEvent) -> bool {
        match event {
            ProgressEvent::VideoCompleted => !std::mem::replace(&mut self.video_done, true),
            ProgressEvent::ChapterCompleted(index) => self.chapters.insert(index),
        }
    }

    /// Number of distinct completed chapters
    pub fn completed_chapters(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        !self.video_done && self.chapters.is_empty()
    }
}

/// A discrete completion event reported by a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressEvent {
    /// The course video was watched to the end
    VideoCompleted,
    /// The chapter at this zero-based outline index was completed
    ChapterCompleted(u32),
}

impl std::fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VideoCompleted => write!(f, "video"),
            Self::ChapterCompleted(index) => write!(f, "chapter[{index}]"),
        }
    }
}
