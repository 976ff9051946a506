//! Axum handlers for the `/api/speech/*` endpoints.
//!
//! Handlers are thin wrappers — each calls exactly one `SpeechPort` method
//! and returns the result as JSON.  Request and response shapes are
//! co-located here rather than in a separate types file to keep the handler
//! surface self-contained.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use parlo_core::ports::{PlaybackStateDto, SpeakRequestDto, StatusDto, VoicesDto};

use crate::error::HttpError;
use crate::state::AppState;

// ── Response body shapes ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakResponse {
    /// Generation token assigned to the submitted utterance.
    pub generation: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResponse {
    /// Whether the command was forwarded to the engine (`false` = no-op).
    pub requested: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// The current status message, or `null` when the channel is clear.
    pub status: Option<StatusDto>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// `POST /api/speech/speak`
pub async fn speak(
    State(state): State<AppState>,
    Json(req): Json<SpeakRequestDto>,
) -> Result<Json<SpeakResponse>, HttpError> {
    let generation = state.speech.speak(req).await?;
    Ok(Json(SpeakResponse { generation }))
}

/// `POST /api/speech/pause`
pub async fn pause(State(state): State<AppState>) -> Result<Json<CommandResponse>, HttpError> {
    let requested = state.speech.pause().await?;
    Ok(Json(CommandResponse { requested }))
}

/// `POST /api/speech/resume`
pub async fn resume(State(state): State<AppState>) -> Result<Json<CommandResponse>, HttpError> {
    let requested = state.speech.resume().await?;
    Ok(Json(CommandResponse { requested }))
}

/// `POST /api/speech/stop`
///
/// Returns the post-stop state snapshot so callers see the idle state and
/// advanced generation without a follow-up request.
pub async fn stop(State(state): State<AppState>) -> Result<Json<PlaybackStateDto>, HttpError> {
    state.speech.stop().await?;
    Ok(Json(state.speech.state().await?))
}

/// `GET /api/speech/state`
pub async fn state(State(state): State<AppState>) -> Result<Json<PlaybackStateDto>, HttpError> {
    Ok(Json(state.speech.state().await?))
}

/// `GET /api/speech/status`
pub async fn status(State(state): State<AppState>) -> Result<Json<StatusResponse>, HttpError> {
    let status = state.speech.status().await?;
    Ok(Json(StatusResponse { status }))
}

/// `GET /api/speech/voices`
pub async fn voices(State(state): State<AppState>) -> Result<Json<VoicesDto>, HttpError> {
    Ok(Json(state.speech.voices().await?))
}

/// `POST /api/speech/voices/refresh`
pub async fn refresh_voices(
    State(state): State<AppState>,
) -> Result<Json<VoicesDto>, HttpError> {
    Ok(Json(state.speech.refresh_voices().await?))
}
