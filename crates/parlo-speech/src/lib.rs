#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod controller;
pub mod engine;
pub mod error;
pub mod service;
pub mod status;
pub mod utterance;
pub mod voice;

pub use controller::{ControllerConfig, PlaybackState, SpeakTicket, SpeechController, SpeechEvent};
pub use engine::simulated::{SimulatedEngine, SimulatedEngineConfig};
pub use engine::{EngineNotification, SpeechEngine};
pub use error::{SpeechError, SpeechResult};
pub use service::{SpeechService, SpeechServiceConfig};
pub use status::{StatusChannel, StatusMessage, StatusSeverity};
pub use utterance::{UtteranceDescriptor, UtteranceOptions};
pub use voice::{VoiceCatalog, VoiceDescriptor};
