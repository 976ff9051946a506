//! Speak command handler.
//!
//! Drives a full utterance lifecycle against the simulated engine,
//! printing state transitions and status updates as they arrive.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Result, bail};
use tokio::sync::mpsc;

use parlo_core::events::AppEvent;
use parlo_core::ports::{AppEventEmitter, SpeakRequestDto, SpeechPort};
use parlo_core::settings::Settings;
use parlo_speech::{SimulatedEngine, SimulatedEngineConfig, SpeechService, SpeechServiceConfig};

/// Arguments accepted by the speak command.
pub struct SpeakArgs {
    pub text: String,
    pub voice: Option<String>,
    pub rate: Option<f32>,
    pub pitch: Option<f32>,
    pub volume: Option<f32>,
    pub pause_after: Option<f64>,
}

/// Event emitter that forwards everything onto an in-process channel so
/// the command loop can print events in arrival order.
struct ChannelEmitter {
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl AppEventEmitter for ChannelEmitter {
    fn emit(&self, event: AppEvent) {
        let _ = self.tx.send(event);
    }
}

/// Execute the speak command.
pub async fn execute(settings: Settings, args: SpeakArgs) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let emitter: Arc<dyn AppEventEmitter> = Arc::new(ChannelEmitter { tx });
    let engine = Arc::new(SimulatedEngine::new(SimulatedEngineConfig::default()));
    let service = SpeechService::new(
        SpeechServiceConfig::from_settings(&settings),
        engine,
        emitter,
    );

    let request = SpeakRequestDto {
        text: args.text,
        voice: args.voice,
        rate: args.rate,
        pitch: args.pitch,
        volume: args.volume,
    };

    let mut generation: Option<u64> = None;
    let mut failed = false;

    // The engine loads its voice inventory lazily; submission waits for
    // the first non-empty catalog announcement.
    while let Some(event) = rx.recv().await {
        match event {
            AppEvent::SpeechVoicesChanged { count } if generation.is_none() && count > 0 => {
                println!("Voices ready ({count} available).");
                let submitted = service.speak(request.clone()).await?;
                println!("Submitted utterance (generation {submitted}).");
                if let Some(secs) = args.pause_after {
                    spawn_pause_demo(Arc::clone(&service), secs);
                }
                generation = Some(submitted);
            }
            AppEvent::SpeechStateChanged {
                previous_state,
                state,
                generation: current,
            } => {
                println!("  {previous_state} -> {state} (generation {current})");
                if generation == Some(current) && (state == "idle" || state == "failed") {
                    failed = state == "failed";
                    break;
                }
            }
            AppEvent::SpeechStatus { status } => {
                println!("  [{}] {}", status.severity, status.message);
            }
            _ => {}
        }
    }

    // Drain anything published alongside the terminal transition, such as
    // the persistent error status.
    while let Ok(event) = rx.try_recv() {
        if let AppEvent::SpeechStatus { status } = event {
            println!("  [{}] {}", status.severity, status.message);
        }
    }

    if failed {
        bail!("playback failed");
    }
    Ok(())
}

/// Pause after `secs` seconds of playback, then resume a second later.
fn spawn_pause_demo(service: Arc<SpeechService>, secs: f64) {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs_f64(secs)).await;
        match service.pause().await {
            Ok(true) => println!("  (pause requested)"),
            Ok(false) => println!("  (pause was a no-op)"),
            Err(e) => eprintln!("  pause failed: {e}"),
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
        match service.resume().await {
            Ok(true) => println!("  (resume requested)"),
            Ok(false) => println!("  (resume was a no-op)"),
            Err(e) => eprintln!("  resume failed: {e}"),
        }
    });
}
