//! Property-based tests for progress scoring
//!
//! These tests verify:
//! - Applying an event twice equals applying it once
//! - The score never decreases across any event sequence
//! - The score always stays within [0, 100]
//! - Stored state survives encode/decode unchanged

use campus_progress_core::{
    apply_event, compute_score, decode_state, encode_state, ProgressEvent, ProgressState,
    FULL_SCORE,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// A chapter count together with events valid for it
fn arb_course_events() -> impl Strategy<Value = (usize, Vec<ProgressEvent>)> {
    (0usize..40).prop_flat_map(|total| {
        let event = if total == 0 {
            Just(ProgressEvent::VideoCompleted).boxed()
        } else {
            prop_oneof![
                1 => Just(ProgressEvent::VideoCompleted),
                4 => (0..total as u32).prop_map(ProgressEvent::ChapterCompleted),
            ]
            .boxed()
        };
        (Just(total), prop::collection::vec(event, 0..60))
    })
}

fn arb_state() -> impl Strategy<Value = ProgressState> {
    (any::<bool>(), prop::collection::btree_set(0u32..100, 0..20))
        .prop_map(|(video_done, chapters)| ProgressState { video_done, chapters })
}

// ============================================================================
// Scoring Properties
// ============================================================================

proptest! {
    /// Property: apply(apply(s, e), e) == apply(s, e)
    #[test]
    fn prop_apply_is_idempotent((total, events) in arb_course_events()) {
        let mut state = ProgressState::default();
        for event in events {
            let once = apply_event(state.clone(), event, total).unwrap();
            let twice = apply_event(once.state.clone(), event, total).unwrap();
            prop_assert!(!twice.changed);
            prop_assert_eq!(&twice.state, &once.state);
            prop_assert_eq!(twice.score, once.score);
            state = once.state;
        }
    }

    /// Property: the score never decreases and never leaves [0, 100]
    #[test]
    fn prop_score_monotonic_and_bounded((total, events) in arb_course_events()) {
        let mut state = ProgressState::default();
        let mut last = compute_score(&state, total);
        for event in events {
            let outcome = apply_event(state, event, total).unwrap();
            prop_assert!(outcome.score >= last);
            prop_assert!((0.0..=FULL_SCORE).contains(&outcome.score));
            prop_assert_eq!(outcome.finished, outcome.score >= FULL_SCORE);
            last = outcome.score;
            state = outcome.state;
        }
    }

    /// Property: event order does not matter
    #[test]
    fn prop_order_independent((total, events) in arb_course_events()) {
        let fold = |events: &[ProgressEvent]| {
            events.iter().fold(ProgressState::default(), |state, event| {
                apply_event(state, *event, total).unwrap().state
            })
        };
        let mut reversed = events.clone();
        reversed.reverse();
        prop_assert_eq!(fold(&events), fold(&reversed));
    }

    /// Property: stale indices beyond the outline never push the score past 100
    #[test]
    fn prop_stale_state_clamped(state in arb_state(), total in 0usize..10) {
        let score = compute_score(&state, total);
        prop_assert!((0.0..=FULL_SCORE).contains(&score));
    }

    /// Property: encoded state decodes to itself
    #[test]
    fn prop_state_survives_storage(state in arb_state()) {
        let encoded = encode_state(&state).unwrap();
        prop_assert_eq!(decode_state(&encoded), state);
    }

    /// Property: decoding arbitrary text never panics
    #[test]
    fn prop_decode_never_panics(raw in ".{0,200}") {
        let _ = decode_state(&raw);
    }
}
