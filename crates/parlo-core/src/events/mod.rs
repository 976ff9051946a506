//! Canonical event union for all cross-adapter events.
//!
//! This module is the single source of truth for events used by SSE handlers
//! and backend emitters.
//!
//! # Structure
//!
//! - `speech` - Playback state, status-channel, and voice-catalog events
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag for frontend compatibility:
//!
//! ```json
//! { "type": "speech_state_changed", "previousState": "idle", "state": "speaking", "generation": 3 }
//! ```

mod speech;

use serde::{Deserialize, Serialize};

// Re-export event payload types
pub use speech::StatusSummary;

/// Canonical event types for all adapters.
///
/// This enum unifies playback, status, and catalog events into a single
/// discriminated union. Each variant includes all necessary context
/// for the event to be self-describing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppEvent {
    // ========== Playback Events ==========
    /// The playback state machine moved to a new state.
    SpeechStateChanged {
        /// State before the transition.
        #[serde(rename = "previousState")]
        previous_state: String,
        /// State after the transition.
        state: String,
        /// Generation token of the utterance that drove the transition.
        generation: u64,
    },

    // ========== Status Channel Events ==========
    /// A message was published on the status channel.
    SpeechStatus {
        /// The published message.
        status: StatusSummary,
    },

    /// The status channel cleared itself (expiry or explicit clear).
    SpeechStatusCleared {
        /// Sequence number of the message that was cleared.
        seq: u64,
    },

    // ========== Voice Catalog Events ==========
    /// The voice catalog was replaced with a fresh snapshot.
    SpeechVoicesChanged {
        /// Number of voices in the new snapshot.
        count: usize,
    },
}

impl AppEvent {
    /// Get the event name for wire protocols.
    ///
    /// This provides consistent event naming for SSE subscribers.
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::SpeechStateChanged { .. } => "speech:state_changed",
            Self::SpeechStatus { .. } => "speech:status",
            Self::SpeechStatusCleared { .. } => "speech:status_cleared",
            Self::SpeechVoicesChanged { .. } => "speech:voices_changed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = AppEvent::speech_state_changed("idle", "speaking", 3);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"speech_state_changed\""));
        assert!(json.contains("\"previousState\":\"idle\""));
        assert!(json.contains("\"state\":\"speaking\""));
        assert!(json.contains("\"generation\":3"));
    }

    #[test]
    fn test_status_event_serialization() {
        let event = AppEvent::speech_status(StatusSummary::new(
            "Speech finished.",
            "success",
            7,
            Some(5_000),
        ));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"speech_status\""));
        assert!(json.contains("\"message\":\"Speech finished.\""));
        assert!(json.contains("\"expiresInMs\":5000"));
    }

    /// Lock down event names to prevent frontend subscription mismatches.
    ///
    /// This test protects the contract between backend event emission and
    /// frontend SSE subscription. If this test fails, update the subscriber
    /// side to match.
    #[test]
    fn event_names_are_stable() {
        let cases = vec![
            (
                AppEvent::speech_state_changed("idle", "speaking", 1),
                "speech:state_changed",
            ),
            (
                AppEvent::speech_status(StatusSummary::new("Paused", "info", 2, None)),
                "speech:status",
            ),
            (AppEvent::speech_status_cleared(2), "speech:status_cleared"),
            (AppEvent::speech_voices_changed(4), "speech:voices_changed"),
        ];

        for (event, expected_name) in cases {
            assert_eq!(event.event_name(), expected_name);
        }
    }
}
