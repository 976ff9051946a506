//! Axum-specific error types and mappings.
//!
//! This module provides error types for the Axum adapter and mappings
//! from `SpeechPortError` and `ToolsError` to HTTP status codes and
//! response bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use parlo_core::ports::SpeechPortError;
use parlo_tools::ToolsError;
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request rejected before reaching the engine (empty text, bad body).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The voice catalog is empty; playback is unavailable.
    #[error("No voices available")]
    NoVoices,

    /// The synthesis engine reported a failure.
    #[error("Engine error: {0}")]
    Engine(String),

    /// The remote tool backend answered with an error.
    #[error("Tool backend error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// The remote tool backend could not be reached at all.
    #[error("Tool backend unreachable: {0}")]
    Unreachable(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
    /// Stable error type discriminant for client-side handling
    #[serde(skip_serializing_if = "Option::is_none", rename = "type")]
    error_type: Option<String>,
    /// Optional additional metadata for specific error types
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<serde_json::Value>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message, error_type, metadata) = match &self {
            Self::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some("VALIDATION_ERROR".to_string()),
                None,
            ),
            Self::NoVoices => (
                StatusCode::CONFLICT,
                "No voices available — playback is disabled until the engine publishes voices"
                    .to_string(),
                Some("NO_VOICES_AVAILABLE".to_string()),
                None,
            ),
            Self::Engine(msg) => (
                StatusCode::BAD_GATEWAY,
                msg.clone(),
                Some("ENGINE_ERROR".to_string()),
                None,
            ),
            Self::Upstream { status, message } => {
                let code = StatusCode::from_u16(*status)
                    .ok()
                    .filter(StatusCode::is_client_error)
                    .unwrap_or(StatusCode::BAD_GATEWAY);
                let metadata_json = serde_json::json!({ "upstreamStatus": status });
                (
                    code,
                    message.clone(),
                    Some("TOOL_BACKEND_ERROR".to_string()),
                    Some(metadata_json),
                )
            }
            Self::Unreachable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                msg.clone(),
                Some("TOOL_BACKEND_UNREACHABLE".to_string()),
                None,
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None, None),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone(), None, None),
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
            error_type,
            metadata,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<SpeechPortError> for HttpError {
    fn from(err: SpeechPortError) -> Self {
        match err {
            SpeechPortError::Validation(msg) => Self::Validation(msg),
            SpeechPortError::NoVoicesAvailable => Self::NoVoices,
            SpeechPortError::Engine(msg) => Self::Engine(msg),
            SpeechPortError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<ToolsError> for HttpError {
    fn from(err: ToolsError) -> Self {
        match err {
            // A success:false envelope arrives with status 200; surface it
            // as a gateway failure, not a fake success.
            ToolsError::Backend { status, message } => Self::Upstream { status, message },
            ToolsError::RequestFailed { status, url } => Self::Upstream {
                status,
                message: format!("tool backend request failed: {url}"),
            },
            ToolsError::Network(e) => Self::Unreachable(e.to_string()),
            ToolsError::InvalidUrl(e) => Self::Internal(e.to_string()),
            ToolsError::JsonParse(e) => Self::Upstream {
                status: 502,
                message: format!("unparseable tool backend response: {e}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: HttpError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn speech_errors_map_to_documented_statuses() {
        assert_eq!(
            status_of(SpeechPortError::Validation("empty".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(SpeechPortError::NoVoicesAvailable.into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(SpeechPortError::Engine("boom".into()).into()),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn upstream_4xx_passes_through() {
        let err = HttpError::from(ToolsError::Backend {
            status: 400,
            message: "No text provided".into(),
        });
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_200_envelope_failure_becomes_bad_gateway() {
        let err = HttpError::from(ToolsError::Backend {
            status: 200,
            message: "Translation service unavailable".into(),
        });
        assert_eq!(status_of(err), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn upstream_5xx_becomes_bad_gateway() {
        let err = HttpError::from(ToolsError::RequestFailed {
            status: 500,
            url: "http://localhost:5000/x".into(),
        });
        assert_eq!(status_of(err), StatusCode::BAD_GATEWAY);
    }
}
