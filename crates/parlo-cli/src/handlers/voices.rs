//! Voices command handler.
//!
//! Prints the simulated engine's voice catalog with the default marked.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use parlo_core::ports::{AppEventEmitter, NoopEmitter, SpeechPort};
use parlo_core::settings::Settings;
use parlo_speech::{SimulatedEngine, SimulatedEngineConfig, SpeechService, SpeechServiceConfig};

/// Execute the voices command.
pub async fn execute(settings: Settings) -> Result<()> {
    // One-shot enumeration; an eager inventory avoids waiting on the
    // engine's usual lazy-load announcement.
    let engine = Arc::new(SimulatedEngine::new(SimulatedEngineConfig {
        voices_ready_after: Duration::ZERO,
        ..SimulatedEngineConfig::default()
    }));
    let service = SpeechService::new(
        SpeechServiceConfig::from_settings(&settings),
        engine,
        Arc::new(NoopEmitter) as Arc<dyn AppEventEmitter>,
    );

    let catalog = service.refresh_voices().await?;
    if catalog.voices.is_empty() {
        println!("No voices available.");
        return Ok(());
    }

    println!("Available voices:");
    for voice in &catalog.voices {
        let marker = if Some(&voice.id) == catalog.default_voice.as_ref() {
            " (default)"
        } else {
            ""
        };
        println!("  {:<12} {}{}", voice.id, voice.lang, marker);
    }
    Ok(())
}
