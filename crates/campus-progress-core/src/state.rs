//! Persisted form of [`ProgressState`]
//!
//! State is stored as JSON text inside a tagged envelope:
//! `{"schema":"v1","video_done":true,"chapters":[0,2]}`. Rows written before
//! the envelope existed hold the bare `{"video_done":..,"chapters":[..]}` form,
//! which still decodes. Anything else decodes to the empty state.

use campus_types::ProgressState;
use serde::{Deserialize, Serialize};

use crate::ProgressError;

#[derive(Serialize, Deserialize)]
#[serde(tag = "schema")]
enum StoredProgress {
    #[serde(rename = "v1")]
    V1(ProgressState),
}

/// Decode stored state, falling back to the empty state on unreadable input
pub fn decode_state(raw: &str) -> ProgressState {
    let raw = raw.trim();
    if raw.is_empty() {
        return ProgressState::default();
    }

    if let Ok(StoredProgress::V1(state)) = serde_json::from_str::<StoredProgress>(raw) {
        return state;
    }

    match serde_json::from_str::<ProgressState>(raw) {
        Ok(state) => state,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable progress state, starting from empty");
            ProgressState::default()
        }
    }
}

/// Encode state in the current envelope
pub fn encode_state(state: &ProgressState) -> Result<String, ProgressError> {
    serde_json::to_string(&StoredProgress::V1(state.clone())).map_err(|e| {
        tracing::error!("Failed to encode progress state: {}", e);
        ProgressError::Internal("failed to encode progress state".to_string())
    })
}
