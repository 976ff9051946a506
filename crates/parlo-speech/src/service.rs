//! `SpeechService` — the adapter that implements `SpeechPort`.
//!
//! This module is the single place where `parlo-speech` native types are
//! converted to the transport-agnostic DTOs defined in `parlo-core`.
//! It also owns every piece of async plumbing around the synchronous
//! [`SpeechController`]: the notification pump per utterance, the status
//! expiry timers, the pause/resume grace timers, and the catalog
//! listener.
//!
//! # Locking discipline
//!
//! The controller and the catalog sit behind separate `RwLock`s and no
//! code path holds both at once. Command methods take the controller
//! write lock only for the synchronous state-machine call and release it
//! before any spawned follow-up runs, so pumps and timers can always
//! make progress. Engine calls made by the controller (`speak`, `pause`,
//! `cancel`) are non-blocking by contract, which keeps the time under
//! the write lock short.

use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast, mpsc};
use tracing::{info, warn};

use parlo_core::events::{AppEvent, StatusSummary};
use parlo_core::ports::{
    AppEventEmitter, PlaybackStateDto, SpeakRequestDto, SpeechPort, SpeechPortError, StatusDto,
    UtteranceDto, VoiceDto, VoicesDto,
};
use parlo_core::settings::Settings;

use crate::controller::{ControllerConfig, SpeakTicket, SpeechController, SpeechEvent};
use crate::engine::SpeechEngine;
use crate::error::SpeechError;
use crate::status::{StatusMessage, StatusSeverity};
use crate::utterance::{UtteranceDescriptor, UtteranceOptions};
use crate::voice::VoiceCatalog;

// ── Configuration ─────────────────────────────────────────────────────────────

/// Service-level knobs, usually derived from persisted [`Settings`].
#[derive(Debug, Clone)]
pub struct SpeechServiceConfig {
    pub controller: ControllerConfig,
    /// How long an unanswered pause/resume request is remembered before
    /// being treated as a no-op.
    pub pause_grace: Duration,
    /// Voice used when a request names none.
    pub default_voice: Option<String>,
    pub default_rate: f32,
    pub default_pitch: f32,
    pub default_volume: f32,
}

impl Default for SpeechServiceConfig {
    fn default() -> Self {
        Self {
            controller: ControllerConfig::default(),
            pause_grace: Duration::from_secs(2),
            default_voice: None,
            default_rate: 1.0,
            default_pitch: 1.0,
            default_volume: 1.0,
        }
    }
}

impl SpeechServiceConfig {
    /// Derive a service configuration from persisted settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            controller: ControllerConfig {
                status_ttl: Duration::from_millis(settings.effective_status_ttl_ms()),
                ..ControllerConfig::default()
            },
            pause_grace: Duration::from_millis(settings.effective_pause_grace_ms()),
            default_voice: settings.default_voice.clone(),
            default_rate: settings.rate.unwrap_or(1.0),
            default_pitch: settings.pitch.unwrap_or(1.0),
            default_volume: settings.volume.unwrap_or(1.0),
        }
    }
}

// ── Service struct ────────────────────────────────────────────────────────────

/// Implements [`SpeechPort`] by wrapping the controller and catalog.
///
/// Must be constructed inside a Tokio runtime: the event bridge, the
/// catalog listener, and the initial voice enumeration all run as
/// spawned tasks.
pub struct SpeechService {
    controller: Arc<RwLock<SpeechController>>,
    catalog: Arc<RwLock<VoiceCatalog>>,
    engine: Arc<dyn SpeechEngine>,
    emitter: Arc<dyn AppEventEmitter>,
    config: SpeechServiceConfig,
}

impl SpeechService {
    /// Create the service and start its background tasks.
    ///
    /// The catalog starts empty; an initial enumeration is kicked off
    /// immediately, and the engine's catalog-changed announcements keep
    /// it fresh afterwards.
    pub fn new(
        config: SpeechServiceConfig,
        engine: Arc<dyn SpeechEngine>,
        emitter: Arc<dyn AppEventEmitter>,
    ) -> Arc<Self> {
        let (controller, event_rx) =
            SpeechController::new(config.controller.clone(), Arc::clone(&engine));
        let controller = Arc::new(RwLock::new(controller));
        spawn_event_bridge(event_rx, Arc::downgrade(&controller), Arc::clone(&emitter));

        let service = Arc::new(Self {
            controller,
            catalog: Arc::new(RwLock::new(VoiceCatalog::new())),
            engine,
            emitter,
            config,
        });
        spawn_catalog_listener(&service);
        spawn_initial_refresh(&service);
        service
    }

    // ── Catalog refresh ───────────────────────────────────────────────────────

    /// Re-enumerate engine voices and replace the catalog wholesale.
    ///
    /// A non-empty result announces itself with a success status; an
    /// empty one stays silent (the engine just is not ready yet). On
    /// failure the previous snapshot is kept untouched.
    async fn refresh_catalog(&self) -> Result<VoicesDto, SpeechError> {
        match self.engine.voices().await {
            Ok(voices) => {
                let count = voices.len();
                let dto = {
                    let mut catalog = self.catalog.write().await;
                    catalog.replace(voices);
                    voices_dto(&catalog)
                };
                self.emitter.emit(AppEvent::speech_voices_changed(count));
                if count > 0 {
                    self.controller.write().await.publish_status(
                        StatusSeverity::Success,
                        "Voices loaded successfully!",
                        None,
                    );
                }
                info!(count, "voice catalog replaced");
                Ok(dto)
            }
            Err(e) => {
                self.controller.write().await.publish_status(
                    StatusSeverity::Error,
                    "Failed to load voices.",
                    None,
                );
                Err(e)
            }
        }
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    /// Fill request gaps with the configured defaults.
    fn resolve_options(&self, request: &SpeakRequestDto) -> UtteranceOptions {
        UtteranceOptions {
            voice: request
                .voice
                .clone()
                .or_else(|| self.config.default_voice.clone()),
            rate: request.rate.unwrap_or(self.config.default_rate),
            pitch: request.pitch.unwrap_or(self.config.default_pitch),
            volume: request.volume.unwrap_or(self.config.default_volume),
        }
    }

    /// Forward an utterance's notifications into the controller, tagged
    /// with the generation captured at submission.
    fn spawn_notification_pump(&self, ticket: SpeakTicket) {
        let controller = Arc::downgrade(&self.controller);
        let SpeakTicket {
            generation,
            mut notifications,
        } = ticket;
        tokio::spawn(async move {
            while let Some(notification) = notifications.recv().await {
                let Some(controller) = controller.upgrade() else {
                    break;
                };
                controller
                    .write()
                    .await
                    .handle_notification(generation, notification);
            }
            // Channel closed: the utterance reached a terminal state or
            // was cancelled. Either way there is nothing left to pump.
        });
    }

    fn spawn_pause_grace(&self, generation: u64) {
        let controller = Arc::downgrade(&self.controller);
        let grace = self.config.pause_grace;
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            if let Some(controller) = controller.upgrade() {
                controller.write().await.pause_grace_elapsed(generation);
            }
        });
    }

    fn spawn_resume_grace(&self, generation: u64) {
        let controller = Arc::downgrade(&self.controller);
        let grace = self.config.pause_grace;
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            if let Some(controller) = controller.upgrade() {
                controller.write().await.resume_grace_elapsed(generation);
            }
        });
    }
}

// ── Background tasks ──────────────────────────────────────────────────────────

/// Bridge `SpeechEvent` → `AppEvent`, forwarding each event to `emitter`
/// and scheduling expiry for every status message that carries a TTL.
///
/// The spawned task self-terminates when the controller's sender is
/// dropped: `recv()` returns `None` and the loop exits. The controller
/// is held weakly so the bridge never keeps it alive on its own.
fn spawn_event_bridge(
    mut event_rx: mpsc::UnboundedReceiver<SpeechEvent>,
    controller: Weak<RwLock<SpeechController>>,
    emitter: Arc<dyn AppEventEmitter>,
) {
    tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                SpeechEvent::StateChanged {
                    previous,
                    state,
                    generation,
                } => {
                    emitter.emit(AppEvent::speech_state_changed(
                        previous.label(),
                        state.label(),
                        generation,
                    ));
                }
                SpeechEvent::StatusPublished(message) => {
                    emitter.emit(AppEvent::speech_status(status_summary(&message)));
                    if let Some(ttl) = message.expires_in {
                        spawn_status_expiry(controller.clone(), message.seq, ttl);
                    }
                }
                SpeechEvent::StatusCleared { seq } => {
                    emitter.emit(AppEvent::speech_status_cleared(seq));
                }
            }
        }
        // event_rx returned None: controller dropped — task exits.
    });
}

/// Clear status message `seq` once its TTL elapses.
///
/// The controller's `expire_status` is sequence-guarded, so a timer that
/// fires after its message was replaced does nothing.
fn spawn_status_expiry(controller: Weak<RwLock<SpeechController>>, seq: u64, ttl: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(ttl).await;
        if let Some(controller) = controller.upgrade() {
            controller.write().await.expire_status(seq);
        }
    });
}

/// React to engine catalog-changed announcements with a refresh.
///
/// Holds the service weakly: when the service is dropped the next
/// announcement ends the task.
fn spawn_catalog_listener(service: &Arc<SpeechService>) {
    let weak = Arc::downgrade(service);
    let mut announcements = service.engine.subscribe_catalog();
    tokio::spawn(async move {
        loop {
            match announcements.recv().await {
                Ok(()) => {
                    let Some(service) = weak.upgrade() else { break };
                    if let Err(e) = service.refresh_catalog().await {
                        warn!(error = %e, "voice refresh after engine announcement failed");
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "catalog announcements lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

/// Populate the catalog once at startup. A lazily-loading engine
/// legitimately answers with an empty list here; the catalog listener
/// picks up the real inventory later.
fn spawn_initial_refresh(service: &Arc<SpeechService>) {
    let weak = Arc::downgrade(service);
    tokio::spawn(async move {
        if let Some(service) = weak.upgrade() {
            if let Err(e) = service.refresh_catalog().await {
                warn!(error = %e, "initial voice enumeration failed");
            }
        }
    });
}

// ── SpeechPort implementation ─────────────────────────────────────────────────

#[async_trait]
impl SpeechPort for SpeechService {
    async fn speak(&self, request: SpeakRequestDto) -> Result<u64, SpeechPortError> {
        {
            let catalog = self.catalog.read().await;
            if catalog.is_empty() {
                return Err(SpeechPortError::NoVoicesAvailable);
            }
        }
        let options = self.resolve_options(&request);
        let ticket = {
            let mut controller = self.controller.write().await;
            controller.speak(&request.text, options).map_err(to_port_err)?
        };
        let generation = ticket.generation;
        self.spawn_notification_pump(ticket);
        Ok(generation)
    }

    async fn pause(&self) -> Result<bool, SpeechPortError> {
        let issued = self.controller.write().await.pause();
        match issued {
            Some(generation) => {
                self.spawn_pause_grace(generation);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn resume(&self) -> Result<bool, SpeechPortError> {
        let issued = self.controller.write().await.resume();
        match issued {
            Some(generation) => {
                self.spawn_resume_grace(generation);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn stop(&self) -> Result<(), SpeechPortError> {
        self.controller.write().await.stop();
        Ok(())
    }

    async fn state(&self) -> Result<PlaybackStateDto, SpeechPortError> {
        let controller = self.controller.read().await;
        Ok(PlaybackStateDto {
            state: controller.state().label().to_owned(),
            generation: controller.generation(),
            utterance: controller.active_utterance().map(utterance_dto),
        })
    }

    async fn status(&self) -> Result<Option<StatusDto>, SpeechPortError> {
        let controller = self.controller.read().await;
        Ok(controller.current_status().map(status_dto))
    }

    async fn voices(&self) -> Result<VoicesDto, SpeechPortError> {
        let catalog = self.catalog.read().await;
        Ok(voices_dto(&catalog))
    }

    async fn refresh_voices(&self) -> Result<VoicesDto, SpeechPortError> {
        self.refresh_catalog().await.map_err(to_port_err)
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Convert a `SpeechError` into its closest `SpeechPortError` equivalent.
///
/// This conversion lives here, in `parlo-speech`, so that `parlo-core`
/// never needs to import `parlo-speech`. The dependency arrow stays
/// one-way.
fn to_port_err(e: SpeechError) -> SpeechPortError {
    match e {
        SpeechError::EmptyText => SpeechPortError::Validation(e.to_string()),
        SpeechError::NoVoicesAvailable => SpeechPortError::NoVoicesAvailable,
        SpeechError::Engine(reason) => SpeechPortError::Engine(reason),
    }
}

fn utterance_dto(d: &UtteranceDescriptor) -> UtteranceDto {
    UtteranceDto {
        text: d.text().to_owned(),
        voice: d.voice().map(str::to_owned),
        rate: d.rate(),
        pitch: d.pitch(),
        volume: d.volume(),
    }
}

fn status_dto(m: &StatusMessage) -> StatusDto {
    StatusDto {
        message: m.text.clone(),
        severity: m.severity.label().to_owned(),
        published_at: m.published_at,
        expires_in_ms: m.expires_in.map(duration_ms),
        seq: m.seq,
    }
}

fn status_summary(m: &StatusMessage) -> StatusSummary {
    StatusSummary::new(
        m.text.clone(),
        m.severity.label(),
        m.seq,
        m.expires_in.map(duration_ms),
    )
}

fn voices_dto(catalog: &VoiceCatalog) -> VoicesDto {
    VoicesDto {
        voices: catalog
            .iter()
            .map(|v| VoiceDto {
                id: v.id.clone(),
                lang: v.lang.clone(),
                is_default: v.is_default,
            })
            .collect(),
        default_voice: catalog.default_voice().map(|v| v.id.clone()),
    }
}

/// Saturating millisecond conversion for wire payloads.
fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
