#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod events;
pub mod paths;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use events::{AppEvent, StatusSummary};
pub use paths::{PathError, config_root, settings_file_path};
pub use ports::{
    AppEventEmitter, NoopEmitter, PlaybackStateDto, SpeakRequestDto, SpeechPort, SpeechPortError,
    StatusDto, UtteranceDto, VoiceDto, VoicesDto,
};
pub use settings::{
    DEFAULT_PAUSE_GRACE_MS, DEFAULT_SERVER_PORT, DEFAULT_STATUS_TTL_MS, DEFAULT_TOOLS_BASE_URL,
    Settings, SettingsError, SettingsUpdate, validate_settings,
};
