//! A timing-faithful simulated engine.
//!
//! Produces no audio. Synthesis is modelled as elapsed time derived from
//! text length and speaking rate, with notifications paced the way a real
//! engine would pace them: a short startup latency before `Started`, then
//! `Finished` (or `Error`) once the simulated playback runs out.
//!
//! The voice inventory can be made lazy with
//! [`SimulatedEngineConfig::voices_ready_after`]: enumeration returns an
//! empty list until the delay elapses, then a catalog-changed
//! announcement fires once, mirroring engines that load voices in the
//! background.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::{Instant, sleep};

use crate::engine::{EngineNotification, SpeechEngine};
use crate::error::SpeechError;
use crate::utterance::UtteranceDescriptor;
use crate::voice::VoiceDescriptor;

/// Granularity of the simulated playback loop.
const TICK: Duration = Duration::from_millis(20);

// ── Configuration ─────────────────────────────────────────────────────────────

/// Tuning knobs for [`SimulatedEngine`].
#[derive(Debug, Clone)]
pub struct SimulatedEngineConfig {
    /// Voice inventory reported once the engine is ready.
    pub voices: Vec<VoiceDescriptor>,
    /// Delay before the inventory becomes available. Zero means voices
    /// are ready immediately and no announcement is made.
    pub voices_ready_after: Duration,
    /// Delay between request submission and the `Started` notification.
    pub startup_latency: Duration,
    /// Pacing of the simulated playback at rate 1.0.
    pub chars_per_second: f64,
    /// Swallow pause requests without reacting, like engines that do not
    /// support pausing mid-utterance.
    pub ignore_pause: bool,
    /// Fail every request with this reason right after it starts.
    pub fail_with: Option<String>,
}

impl Default for SimulatedEngineConfig {
    fn default() -> Self {
        Self {
            voices: builtin_voices(),
            voices_ready_after: Duration::from_millis(200),
            startup_latency: Duration::from_millis(40),
            chars_per_second: 30.0,
            ignore_pause: false,
            fail_with: None,
        }
    }
}

fn builtin_voices() -> Vec<VoiceDescriptor> {
    vec![
        VoiceDescriptor::new("Samantha", "en-US", true),
        VoiceDescriptor::new("Daniel", "en-GB", false),
        VoiceDescriptor::new("Amelie", "fr-CA", false),
        VoiceDescriptor::new("Yuna", "ko-KR", false),
    ]
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Simulated [`SpeechEngine`] for development and tests.
///
/// Must be constructed inside a Tokio runtime: the lazy-inventory
/// announcement and every per-request driver run as spawned tasks.
pub struct SimulatedEngine {
    config: SimulatedEngineConfig,
    ready_at: Instant,
    catalog_tx: broadcast::Sender<()>,
    /// Bumped by `cancel()`; driver tasks holding an older epoch fall
    /// silent and close their channel without a terminal notification.
    epoch: Arc<AtomicU64>,
    paused_tx: watch::Sender<bool>,
}

impl SimulatedEngine {
    #[must_use]
    pub fn new(config: SimulatedEngineConfig) -> Self {
        let (catalog_tx, _) = broadcast::channel(8);
        let ready_at = Instant::now() + config.voices_ready_after;
        if !config.voices_ready_after.is_zero() {
            let tx = catalog_tx.clone();
            let delay = config.voices_ready_after;
            tokio::spawn(async move {
                sleep(delay).await;
                // No subscribers yet is fine; the initial enumeration
                // already happened against the empty inventory.
                let _ = tx.send(());
            });
        }
        let (paused_tx, _) = watch::channel(false);
        Self {
            config,
            ready_at,
            catalog_tx,
            epoch: Arc::new(AtomicU64::new(0)),
            paused_tx,
        }
    }
}

#[async_trait]
impl SpeechEngine for SimulatedEngine {
    async fn voices(&self) -> Result<Vec<VoiceDescriptor>, SpeechError> {
        if Instant::now() < self.ready_at {
            // Inventory still loading; announcement follows.
            return Ok(Vec::new());
        }
        Ok(self.config.voices.clone())
    }

    fn speak(&self, utterance: &UtteranceDescriptor) -> mpsc::UnboundedReceiver<EngineNotification> {
        let (tx, rx) = mpsc::unbounded_channel();
        // A fresh request always starts out playing.
        self.paused_tx.send_replace(false);
        let mut paused_rx = self.paused_tx.subscribe();
        let epoch = Arc::clone(&self.epoch);
        let my_epoch = epoch.load(Ordering::SeqCst);
        let startup = self.config.startup_latency;
        let fail_with = self.config.fail_with.clone();
        let total = speaking_duration(utterance.text(), utterance.rate(), self.config.chars_per_second);

        tokio::spawn(async move {
            sleep(startup).await;
            if epoch.load(Ordering::SeqCst) != my_epoch {
                return;
            }
            let _ = tx.send(EngineNotification::Started);
            if let Some(reason) = fail_with {
                let _ = tx.send(EngineNotification::Error(reason));
                return;
            }
            let mut remaining = total;
            let mut was_paused = *paused_rx.borrow_and_update();
            loop {
                sleep(TICK).await;
                if epoch.load(Ordering::SeqCst) != my_epoch {
                    return;
                }
                let paused = *paused_rx.borrow_and_update();
                if paused != was_paused {
                    was_paused = paused;
                    let _ = tx.send(if paused {
                        EngineNotification::Paused
                    } else {
                        EngineNotification::Resumed
                    });
                }
                if !paused {
                    remaining = remaining.saturating_sub(TICK);
                    if remaining.is_zero() {
                        let _ = tx.send(EngineNotification::Finished);
                        return;
                    }
                }
            }
        });
        rx
    }

    fn pause(&self) {
        if self.config.ignore_pause {
            tracing::debug!("simulated engine is configured to ignore pause requests");
            return;
        }
        self.paused_tx.send_replace(true);
    }

    fn resume(&self) {
        self.paused_tx.send_replace(false);
    }

    fn cancel(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.paused_tx.send_replace(false);
    }

    fn subscribe_catalog(&self) -> broadcast::Receiver<()> {
        self.catalog_tx.subscribe()
    }
}

/// Simulated playback time for `text` at the given rate.
#[allow(clippy::cast_precision_loss)] // char counts are far below 2^52
fn speaking_duration(text: &str, rate: f32, chars_per_second: f64) -> Duration {
    let cps = (chars_per_second * f64::from(rate)).max(1.0);
    let secs = text.chars().count() as f64 / cps;
    Duration::from_secs_f64(secs.max(0.05))
}
