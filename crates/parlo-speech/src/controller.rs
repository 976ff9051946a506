//! Speech playback controller — the state machine around the engine.
//!
//! ```text
//!            speak()                 engine "finished"
//!   Idle ───────────────▶ (submitted) ───▶ Speaking ───▶ Idle
//!                                            │  ▲
//!                            engine "paused" │  │ engine "resumed"
//!                                            ▼  │
//!                                           Paused
//!
//!   any state ──(engine "error")──▶ Failed
//!   any state ──(stop())─────────▶ Idle        (the one synchronous reset)
//! ```
//!
//! The controller never guesses: apart from `stop`, every transition
//! waits for the engine to confirm it. Each submitted utterance gets a
//! generation number; notifications are applied together with the
//! generation they were captured under, and anything stale is dropped.
//! That makes rapid speak/stop/speak sequences safe — a notification from
//! a superseded utterance can never move the state machine.
//!
//! This type is a plain synchronous state machine. It holds no locks and
//! never awaits; [`crate::service::SpeechService`] owns the async side
//! (notification pumps, expiry and grace timers).

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::engine::{EngineNotification, SpeechEngine};
use crate::error::SpeechError;
use crate::status::{StatusChannel, StatusMessage, StatusSeverity};
use crate::utterance::{UtteranceDescriptor, UtteranceOptions};

// ── Playback state ────────────────────────────────────────────────────────────

/// Externally visible playback states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Nothing playing, ready for a new utterance.
    Idle,
    /// The engine confirmed audible output is in progress.
    Speaking,
    /// The engine confirmed playback is paused.
    Paused,
    /// The last utterance failed inside the engine.
    Failed,
}

impl PlaybackState {
    /// Wire label used in DTOs and event payloads.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Speaking => "speaking",
            Self::Paused => "paused",
            Self::Failed => "failed",
        }
    }
}

// ── Events ────────────────────────────────────────────────────────────────────

/// Events the controller pushes to its single consumer.
#[derive(Debug, Clone)]
pub enum SpeechEvent {
    /// The playback state changed. Emitted only on actual change.
    StateChanged {
        previous: PlaybackState,
        state: PlaybackState,
        generation: u64,
    },
    /// A status message was published (or replaced the previous one).
    StatusPublished(StatusMessage),
    /// The current status message expired or was cleared.
    StatusCleared { seq: u64 },
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Timing knobs for the controller's status messages.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Default time-to-live for non-error status messages.
    pub status_ttl: Duration,
    /// Longer TTL for the "Speaking..." message, which should outlive
    /// short utterances.
    pub speaking_status_ttl: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            status_ttl: Duration::from_secs(5),
            speaking_status_ttl: Duration::from_secs(10),
        }
    }
}

// ── Pending request marker ────────────────────────────────────────────────────

/// A pause or resume request that was sent to the engine and has not been
/// confirmed yet. Carries the generation it was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingRequest {
    Pause(u64),
    Resume(u64),
}

// ── Speak ticket ──────────────────────────────────────────────────────────────

/// Hand-off for a freshly submitted utterance.
///
/// The caller is responsible for pumping `notifications` back into
/// [`SpeechController::handle_notification`], always passing the
/// `generation` captured here. That pairing is what lets the controller
/// recognise and drop notifications from superseded utterances.
#[derive(Debug)]
pub struct SpeakTicket {
    pub generation: u64,
    pub notifications: mpsc::UnboundedReceiver<EngineNotification>,
}

// ── Controller ────────────────────────────────────────────────────────────────

/// The playback state machine.
pub struct SpeechController {
    state: PlaybackState,
    /// Monotonic utterance counter. Advanced on every submission and on
    /// `stop`, so in-flight notifications from before either point are
    /// recognisably stale.
    generation: u64,
    /// The utterance the engine is currently working on, kept from
    /// submission (not from `Started`) so a cancel always has a target.
    active: Option<UtteranceDescriptor>,
    pending: Option<PendingRequest>,
    status: StatusChannel,
    engine: Arc<dyn SpeechEngine>,
    event_tx: mpsc::UnboundedSender<SpeechEvent>,
    config: ControllerConfig,
}

impl SpeechController {
    /// Create a controller and the receiving end of its event channel.
    pub fn new(
        config: ControllerConfig,
        engine: Arc<dyn SpeechEngine>,
    ) -> (Self, mpsc::UnboundedReceiver<SpeechEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let status = StatusChannel::new(config.status_ttl);
        (
            Self {
                state: PlaybackState::Idle,
                generation: 0,
                active: None,
                pending: None,
                status,
                engine,
                event_tx,
                config,
            },
            event_rx,
        )
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn active_utterance(&self) -> Option<&UtteranceDescriptor> {
        self.active.as_ref()
    }

    #[must_use]
    pub const fn current_status(&self) -> Option<&StatusMessage> {
        self.status.current()
    }

    // ── Commands ──────────────────────────────────────────────────────────────

    /// Validate and submit an utterance, superseding any active one.
    ///
    /// On success the new generation is in effect and the returned ticket
    /// carries the engine's notification channel. The state does not
    /// change here; it changes when the engine reports `Started`.
    ///
    /// Validation failure publishes an error status and leaves playback
    /// untouched.
    pub fn speak(
        &mut self,
        text: &str,
        options: UtteranceOptions,
    ) -> Result<SpeakTicket, SpeechError> {
        let descriptor = match UtteranceDescriptor::new(text, options) {
            Ok(d) => d,
            Err(e) => {
                self.publish_status(
                    StatusSeverity::Error,
                    "Please enter some text to speak.",
                    None,
                );
                return Err(e);
            }
        };

        // Cancel before submitting, so the engine never juggles two
        // requests from us at once.
        if self.active.is_some() {
            tracing::debug!(generation = self.generation, "cancelling active utterance");
            self.engine.cancel();
        }
        self.generation += 1;
        self.pending = None;
        let generation = self.generation;
        let notifications = self.engine.speak(&descriptor);
        self.active = Some(descriptor);
        tracing::info!(generation, "utterance submitted");
        Ok(SpeakTicket {
            generation,
            notifications,
        })
    }

    /// Request a pause. Meaningful only while speaking; otherwise a no-op
    /// returning `None`.
    ///
    /// Returns the generation the request was issued under, which the
    /// caller should feed back via [`Self::pause_grace_elapsed`] if the
    /// engine never answers.
    pub fn pause(&mut self) -> Option<u64> {
        if self.state != PlaybackState::Speaking {
            tracing::debug!(state = ?self.state, "ignoring pause, nothing speaking");
            return None;
        }
        self.engine.pause();
        self.pending = Some(PendingRequest::Pause(self.generation));
        self.publish_status(StatusSeverity::Info, "Paused", None);
        Some(self.generation)
    }

    /// Request a resume. Meaningful only while paused; otherwise a no-op
    /// returning `None`.
    pub fn resume(&mut self) -> Option<u64> {
        if self.state != PlaybackState::Paused {
            tracing::debug!(state = ?self.state, "ignoring resume, nothing paused");
            return None;
        }
        self.engine.resume();
        self.pending = Some(PendingRequest::Resume(self.generation));
        self.publish_status(StatusSeverity::Info, "Resuming...", None);
        Some(self.generation)
    }

    /// Cancel everything and reset to idle immediately.
    ///
    /// The generation advances so that any notification still in flight
    /// from the cancelled utterance is dropped as stale.
    pub fn stop(&mut self) {
        self.engine.cancel();
        self.generation += 1;
        self.active = None;
        self.pending = None;
        self.set_state(PlaybackState::Idle);
        self.publish_status(StatusSeverity::Info, "Stopped", None);
    }

    // ── Engine notifications ──────────────────────────────────────────────────

    /// Apply an engine notification captured under `generation`.
    ///
    /// Notifications from a generation other than the current one are
    /// dropped: their utterance was superseded or stopped, and its fate
    /// no longer matters.
    pub fn handle_notification(&mut self, generation: u64, notification: EngineNotification) {
        if generation != self.generation {
            tracing::debug!(
                stale = generation,
                current = self.generation,
                ?notification,
                "dropping stale engine notification"
            );
            return;
        }
        match notification {
            EngineNotification::Started => {
                // The generation check above already guarantees this is
                // the current utterance, whatever state its predecessor
                // left behind. A cancelled request closes silently, so
                // the machine may still read Speaking here; `set_state`
                // makes that a no-op while the status is still published
                // for the new utterance.
                if self.active.is_some() {
                    self.pending = None;
                    self.set_state(PlaybackState::Speaking);
                    self.publish_status(
                        StatusSeverity::Info,
                        "Speaking...",
                        Some(self.config.speaking_status_ttl),
                    );
                }
            }
            EngineNotification::Paused => {
                if self.state == PlaybackState::Speaking {
                    self.pending = None;
                    self.set_state(PlaybackState::Paused);
                }
            }
            EngineNotification::Resumed => {
                if self.state == PlaybackState::Paused {
                    self.pending = None;
                    self.set_state(PlaybackState::Speaking);
                }
            }
            EngineNotification::Finished => {
                if matches!(self.state, PlaybackState::Speaking | PlaybackState::Paused) {
                    self.active = None;
                    self.pending = None;
                    self.set_state(PlaybackState::Idle);
                    self.publish_status(StatusSeverity::Success, "Speech finished.", None);
                }
            }
            EngineNotification::Error(reason) => {
                self.active = None;
                self.pending = None;
                self.set_state(PlaybackState::Failed);
                self.publish_status(
                    StatusSeverity::Error,
                    &format!("Speech error: {reason}"),
                    None,
                );
            }
        }
    }

    // ── Timer callbacks ───────────────────────────────────────────────────────

    /// A pause request issued under `generation` went unanswered for the
    /// grace period. Forget it; playback evidently carried on.
    pub fn pause_grace_elapsed(&mut self, generation: u64) {
        if self.pending == Some(PendingRequest::Pause(generation)) {
            self.pending = None;
            tracing::debug!(generation, "pause request unanswered, treating as no-op");
        }
    }

    /// Same as [`Self::pause_grace_elapsed`], for resume requests.
    pub fn resume_grace_elapsed(&mut self, generation: u64) {
        if self.pending == Some(PendingRequest::Resume(generation)) {
            self.pending = None;
            tracing::debug!(generation, "resume request unanswered, treating as no-op");
        }
    }

    /// Expire the status message with sequence number `seq` if it is
    /// still the current one.
    pub fn expire_status(&mut self, seq: u64) {
        if self.status.expire(seq) {
            self.emit(SpeechEvent::StatusCleared { seq });
        }
    }

    /// Explicitly clear whatever status message is showing.
    pub fn clear_status(&mut self) {
        if let Some(seq) = self.status.clear() {
            self.emit(SpeechEvent::StatusCleared { seq });
        }
    }

    // ── Status publication ────────────────────────────────────────────────────

    /// Publish a status message and emit the matching event.
    ///
    /// Also used by the service layer for messages that originate outside
    /// the state machine (voice catalog refreshes).
    pub fn publish_status(&mut self, severity: StatusSeverity, text: &str, ttl: Option<Duration>) {
        let message = self.status.publish(severity, text, ttl);
        self.emit(SpeechEvent::StatusPublished(message));
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn set_state(&mut self, new_state: PlaybackState) {
        if self.state != new_state {
            tracing::debug!(
                old = ?self.state,
                new = ?new_state,
                generation = self.generation,
                "playback state transition"
            );
            let previous = self.state;
            self.state = new_state;
            self.emit(SpeechEvent::StateChanged {
                previous,
                state: new_state,
                generation: self.generation,
            });
        }
    }

    fn emit(&self, event: SpeechEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::warn!("speech event receiver dropped");
        }
    }
}

impl Drop for SpeechController {
    fn drop(&mut self) {
        if self.active.is_some() {
            self.engine.cancel();
        }
    }
}
