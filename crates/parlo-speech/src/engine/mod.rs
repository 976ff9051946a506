//! Engine abstraction — the asynchronous synthesis capability the
//! controller drives.
//!
//! An engine accepts requests and reports what actually happened through
//! per-request notification channels. Command methods (`speak`, `pause`,
//! `resume`, `cancel`) return immediately; outcomes only ever arrive as
//! notifications.

pub mod simulated;

use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};

use crate::error::SpeechError;
use crate::utterance::UtteranceDescriptor;
use crate::voice::VoiceDescriptor;

// ── Notifications ─────────────────────────────────────────────────────────────

/// Lifecycle notifications an engine emits for a submitted request.
///
/// `Finished` and `Error` are terminal: the engine drops its sender after
/// emitting one, which closes the per-request channel. A cancelled
/// request's channel simply closes without a terminal notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineNotification {
    /// Audible output has begun.
    Started,
    /// The engine honoured a pause request.
    Paused,
    /// The engine resumed a paused request.
    Resumed,
    /// The request completed normally.
    Finished,
    /// The request failed inside the engine.
    Error(String),
}

// ── Engine trait ──────────────────────────────────────────────────────────────

/// Contract for an asynchronous text-to-speech engine.
///
/// Implementations must be cheap to call: every method here returns
/// without waiting for synthesis to make progress.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Enumerate the engine's current voices.
    ///
    /// May legitimately return an empty list while the engine is still
    /// loading its voice inventory; a catalog-changed announcement (see
    /// [`subscribe_catalog`](Self::subscribe_catalog)) follows once the
    /// real list is ready.
    async fn voices(&self) -> Result<Vec<VoiceDescriptor>, SpeechError>;

    /// Submit a synthesis request and return its private notification
    /// channel.
    fn speak(&self, utterance: &UtteranceDescriptor) -> mpsc::UnboundedReceiver<EngineNotification>;

    /// Request a pause of the active utterance. Best effort: confirmation
    /// arrives as [`EngineNotification::Paused`], or not at all.
    fn pause(&self);

    /// Request that a paused utterance resume.
    fn resume(&self);

    /// Cancel all in-flight requests. Their channels close without a
    /// terminal notification.
    fn cancel(&self);

    /// Subscribe to engine-level announcements that the voice inventory
    /// changed and should be re-enumerated.
    fn subscribe_catalog(&self) -> broadcast::Receiver<()>;
}
