//! Error types for the speech playback domain.

use thiserror::Error;

/// Result alias used throughout `parlo-speech`.
pub type SpeechResult<T> = Result<T, SpeechError>;

/// Errors produced by utterance validation, the playback controller, and
/// the speech service.
///
/// `EmptyText` and `NoVoicesAvailable` are caller mistakes and leave the
/// playback state untouched. `Engine` reports a failure inside the
/// synthesis engine itself; the controller reflects it by entering the
/// failed state when it arrives as a notification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpeechError {
    /// The utterance text was empty or whitespace-only.
    #[error("utterance text is empty")]
    EmptyText,

    /// No voices are available to speak with.
    ///
    /// Raised by the service when the catalog is empty, typically before
    /// a lazily-loading engine has announced its voice list.
    #[error("no voices available")]
    NoVoicesAvailable,

    /// The synthesis engine reported a failure.
    #[error("engine error: {0}")]
    Engine(String),
}
