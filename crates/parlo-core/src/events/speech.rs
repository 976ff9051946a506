//! Speech-domain event payloads and constructors.

use serde::{Deserialize, Serialize};

use super::AppEvent;

/// Summary of a status-channel message for event payloads.
///
/// This is a lightweight representation for events — timing is expressed as a
/// relative interval so subscribers need no clock agreement with the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    /// Human-readable status text.
    pub message: String,
    /// Severity label (`"info"`, `"success"`, `"error"`).
    pub severity: String,
    /// Publication sequence number.
    pub seq: u64,
    /// Milliseconds until self-clear; `None` for persistent messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_ms: Option<u64>,
}

impl StatusSummary {
    /// Create a new status summary.
    pub fn new(
        message: impl Into<String>,
        severity: impl Into<String>,
        seq: u64,
        expires_in_ms: Option<u64>,
    ) -> Self {
        Self {
            message: message.into(),
            severity: severity.into(),
            seq,
            expires_in_ms,
        }
    }
}

impl AppEvent {
    /// Create a playback state-change event.
    pub fn speech_state_changed(
        previous_state: impl Into<String>,
        state: impl Into<String>,
        generation: u64,
    ) -> Self {
        Self::SpeechStateChanged {
            previous_state: previous_state.into(),
            state: state.into(),
            generation,
        }
    }

    /// Create a status-published event.
    pub const fn speech_status(status: StatusSummary) -> Self {
        Self::SpeechStatus { status }
    }

    /// Create a status-cleared event.
    pub const fn speech_status_cleared(seq: u64) -> Self {
        Self::SpeechStatusCleared { seq }
    }

    /// Create a voice-catalog-replaced event.
    pub const fn speech_voices_changed(count: usize) -> Self {
        Self::SpeechVoicesChanged { count }
    }
}
