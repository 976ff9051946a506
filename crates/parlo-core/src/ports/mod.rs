//! Port traits — the boundary between the domain crates and the adapters.
//!
//! Adapters (`parlo-axum`, `parlo-cli`) depend on these traits only; the
//! implementations live in the domain crates (`parlo-speech`).

mod event_emitter;
mod speech;

pub use event_emitter::{AppEventEmitter, NoopEmitter};
pub use speech::{
    PlaybackStateDto, SpeakRequestDto, SpeechPort, SpeechPortError, StatusDto, UtteranceDto,
    VoiceDto, VoicesDto,
};
