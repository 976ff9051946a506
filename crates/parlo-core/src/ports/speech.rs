//! Speech playback port — trait abstraction for playback control operations.
//!
//! # Design Rules
//!
//! - DTOs here are transport-agnostic wire shapes (no `parlo-speech` types).
//!   Conversion from native types happens inside `parlo-speech`, never here.
//!   This keeps `parlo-core` free of any dependency on `parlo-speech`.
//! - `SpeechPort` is the only surface `parlo-axum` and `parlo-cli` need in
//!   order to serve all playback endpoints.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── DTOs ─────────────────────────────────────────────────────────────────────

/// A speak request as it arrives from a caller.
///
/// Numeric fields are optional; absent values fall back to the configured
/// defaults and are clamped into engine-valid ranges before submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakRequestDto {
    /// Text to synthesize. Must be non-empty after trimming.
    pub text: String,
    /// Voice identity to use; `None` lets the engine choose.
    pub voice: Option<String>,
    /// Speaking rate multiplier (clamped to 0.5–2.0).
    pub rate: Option<f32>,
    /// Voice pitch (clamped to 0.0–2.0).
    pub pitch: Option<f32>,
    /// Playback volume (clamped to 0.0–1.0).
    pub volume: Option<f32>,
}

/// The utterance currently owned by the controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UtteranceDto {
    /// Text being synthesized.
    pub text: String,
    /// Voice identity, if one was pinned.
    pub voice: Option<String>,
    /// Effective (clamped) rate.
    pub rate: f32,
    /// Effective (clamped) pitch.
    pub pitch: f32,
    /// Effective (clamped) volume.
    pub volume: f32,
}

/// Snapshot of the playback state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackStateDto {
    /// State machine label (`"idle"`, `"speaking"`, `"paused"`, `"failed"`).
    pub state: String,
    /// Current generation token.
    pub generation: u64,
    /// The active utterance, if one is in flight.
    pub utterance: Option<UtteranceDto>,
}

/// The current status-channel message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusDto {
    /// Human-readable status text.
    pub message: String,
    /// Severity label (`"info"`, `"success"`, `"error"`).
    pub severity: String,
    /// When the message was published.
    pub published_at: DateTime<Utc>,
    /// Milliseconds until self-clear; `None` for persistent (error) messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_ms: Option<u64>,
    /// Publication sequence number.
    pub seq: u64,
}

/// A single voice offered by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceDto {
    /// Engine-assigned voice identity.
    pub id: String,
    /// BCP-47 style language tag (e.g. `"en-US"`).
    pub lang: String,
    /// Whether the engine flags this voice as its default.
    pub is_default: bool,
}

/// The voice catalog snapshot plus the resolved default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicesDto {
    /// Voices in engine order.
    pub voices: Vec<VoiceDto>,
    /// Identity of the default voice, or `None` when the catalog is empty
    /// (callers should disable playback controls).
    pub default_voice: Option<String>,
}

// ── Error ─────────────────────────────────────────────────────────────────────

/// Errors returned by `SpeechPort` operations.
///
/// These map deterministically to HTTP status codes via the
/// `From<SpeechPortError> for HttpError` impl in `parlo-axum`.
#[derive(Debug, Error)]
pub enum SpeechPortError {
    /// The request was rejected before reaching the engine (e.g. empty text).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The voice catalog is empty; playback is unavailable until voices load.
    #[error("No voices available — refresh the voice list once the engine has loaded")]
    NoVoicesAvailable,

    /// The engine reported a failure.
    #[error("Engine error: {0}")]
    Engine(String),

    /// Unexpected internal error.
    #[error("Internal speech error: {0}")]
    Internal(String),
}

// ── Port trait ────────────────────────────────────────────────────────────────

/// Port trait for speech playback operations.
///
/// Implemented by `SpeechService` in `parlo-speech`.
/// Consumed by Axum handlers and the CLI.
///
/// All commands are non-blocking: `speak`/`pause`/`resume` return once the
/// request has been handed to the engine; the resulting state transitions
/// arrive later as `AppEvent`s and are visible through `state()`.
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Submit a new utterance. Supersedes any active one.
    ///
    /// Returns the generation token assigned to the request.
    async fn speak(&self, request: SpeakRequestDto) -> Result<u64, SpeechPortError>;

    /// Request a pause of the active utterance.
    ///
    /// Returns `true` if a pause request was issued to the engine, `false`
    /// when the command was a no-op (nothing speaking).
    async fn pause(&self) -> Result<bool, SpeechPortError>;

    /// Request a resume of a paused utterance.
    ///
    /// Returns `true` if a resume request was issued to the engine.
    async fn resume(&self) -> Result<bool, SpeechPortError>;

    /// Hard-stop playback: cancel the engine request and reset to idle.
    async fn stop(&self) -> Result<(), SpeechPortError>;

    /// Return the current playback state snapshot.
    async fn state(&self) -> Result<PlaybackStateDto, SpeechPortError>;

    /// Return the current status-channel message, if any.
    async fn status(&self) -> Result<Option<StatusDto>, SpeechPortError>;

    /// Return the current voice catalog snapshot.
    async fn voices(&self) -> Result<VoicesDto, SpeechPortError>;

    /// Force a catalog refresh from the engine and return the new snapshot.
    async fn refresh_voices(&self) -> Result<VoicesDto, SpeechPortError>;
}
