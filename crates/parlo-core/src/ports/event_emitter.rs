//! Application event fan-out port.

use crate::events::AppEvent;

/// Sink for application events leaving the core.
///
/// The speech service publishes through this trait without knowing the
/// transport; the HTTP adapter broadcasts over SSE, the CLI prints, tests
/// record. Emitters are shared as `Arc<dyn AppEventEmitter>`, so
/// implementations only need `Send + Sync`.
pub trait AppEventEmitter: Send + Sync {
    /// Deliver one event. Must not block; an event with no listener is
    /// simply dropped.
    fn emit(&self, event: AppEvent);
}

/// Emitter that discards every event.
///
/// For playback without an event surface, such as one-shot CLI commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEmitter;

impl AppEventEmitter for NoopEmitter {
    fn emit(&self, _event: AppEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn noop_emitter_swallows_events() {
        NoopEmitter.emit(AppEvent::speech_voices_changed(3));
    }

    #[test]
    fn emitters_are_shareable_trait_objects() {
        let emitter: Arc<dyn AppEventEmitter> = Arc::new(NoopEmitter);
        let shared = Arc::clone(&emitter);
        shared.emit(AppEvent::speech_voices_changed(0));
    }
}
