//! Completion scoring
//!
//! The video is worth half the course and the chapters share the other half
//! equally. A course without chapters is complete once its video is.

use campus_types::{ProgressEvent, ProgressState};

use crate::ProgressError;

/// Score of a finished course
pub const FULL_SCORE: f64 = 100.0;

const VIDEO_WEIGHT: f64 = 50.0;
const CHAPTERS_WEIGHT: f64 = 50.0;

/// Result of applying one event
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressOutcome {
    /// Completion score in `[0, 100]`
    pub score: f64,
    /// Whether the score reached 100
    pub finished: bool,
    pub state: ProgressState,
    /// Whether the event added anything to the state
    pub changed: bool,
}

/// Completion score for a state, given the course's chapter count
pub fn compute_score(state: &ProgressState, total_chapters: usize) -> f64 {
    if total_chapters == 0 {
        return if state.video_done { FULL_SCORE } else { 0.0 };
    }

    let video = if state.video_done { VIDEO_WEIGHT } else { 0.0 };
    // Multiply before dividing so a full set of chapters is exactly 50
    let chapters = CHAPTERS_WEIGHT * state.completed_chapters() as f64 / total_chapters as f64;

    (video + chapters).min(FULL_SCORE)
}

/// Check a chapter index against the outline
pub fn validate_event(event: ProgressEvent, total_chapters: usize) -> Result<(), ProgressError> {
    match event {
        ProgressEvent::ChapterCompleted(index) if index as usize >= total_chapters => {
            Err(ProgressError::InvalidChapterIndex {
                index,
                total: total_chapters,
            })
        }
        _ => Ok(()),
    }
}

/// Apply an event to a state and rescore it.
///
/// Out-of-range chapter indices are rejected. Indices already in the state
/// are kept whatever the current outline length.
pub fn apply_event(
    mut state: ProgressState,
    event: ProgressEvent,
    total_chapters: usize,
) -> Result<ProgressOutcome, ProgressError> {
    validate_event(event, total_chapters)?;

    let changed = state.apply(event);
    let score = compute_score(&state, total_chapters);

    Ok(ProgressOutcome {
        score,
        finished: score >= FULL_SCORE,
        state,
        changed,
    })
}
