//! Settings domain types, validation, and JSON persistence.
//!
//! This module contains the user-facing settings used across the application.
//! All fields are optional so a settings file can carry only the values the
//! user actually changed; effective values fall back to the defaults below.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default time-to-live for non-error status messages, in milliseconds.
pub const DEFAULT_STATUS_TTL_MS: u64 = 5_000;

/// Default bounded wait before an unanswered pause/resume request is treated
/// as ignored, in milliseconds.
pub const DEFAULT_PAUSE_GRACE_MS: u64 = 2_000;

/// Default port for the HTTP adapter.
pub const DEFAULT_SERVER_PORT: u16 = 5180;

/// Default base URL for the remote AI tool backend.
pub const DEFAULT_TOOLS_BASE_URL: &str = "http://localhost:5000";

/// Application settings structure.
///
/// All fields are optional to support partial updates and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Preferred voice identity for new utterances.
    pub default_voice: Option<String>,

    /// Default speaking rate (clamped to 0.5–2.0 at submission).
    pub rate: Option<f32>,

    /// Default voice pitch (clamped to 0.0–2.0 at submission).
    pub pitch: Option<f32>,

    /// Default playback volume (clamped to 0.0–1.0 at submission).
    pub volume: Option<f32>,

    /// Time-to-live for non-error status messages, in milliseconds.
    pub status_ttl_ms: Option<u64>,

    /// Bounded wait before an unanswered pause/resume request is dropped,
    /// in milliseconds.
    pub pause_grace_ms: Option<u64>,

    /// Base URL for the remote AI tool backend.
    pub tools_base_url: Option<String>,

    /// Port for the HTTP adapter.
    pub server_port: Option<u16>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            default_voice: None,
            rate: Some(1.0),
            pitch: Some(1.0),
            volume: Some(1.0),
            status_ttl_ms: Some(DEFAULT_STATUS_TTL_MS),
            pause_grace_ms: Some(DEFAULT_PAUSE_GRACE_MS),
            tools_base_url: None,
            server_port: Some(DEFAULT_SERVER_PORT),
        }
    }

    /// Get the effective status time-to-live (with default fallback).
    #[must_use]
    pub const fn effective_status_ttl_ms(&self) -> u64 {
        match self.status_ttl_ms {
            Some(ttl) => ttl,
            None => DEFAULT_STATUS_TTL_MS,
        }
    }

    /// Get the effective pause grace interval (with default fallback).
    #[must_use]
    pub const fn effective_pause_grace_ms(&self) -> u64 {
        match self.pause_grace_ms {
            Some(grace) => grace,
            None => DEFAULT_PAUSE_GRACE_MS,
        }
    }

    /// Get the effective server port (with default fallback).
    #[must_use]
    pub const fn effective_server_port(&self) -> u16 {
        match self.server_port {
            Some(port) => port,
            None => DEFAULT_SERVER_PORT,
        }
    }

    /// Get the effective tools backend base URL (with default fallback).
    #[must_use]
    pub fn effective_tools_base_url(&self) -> &str {
        self.tools_base_url
            .as_deref()
            .unwrap_or(DEFAULT_TOOLS_BASE_URL)
    }

    /// Merge another settings into this one, only updating fields that are Some.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(ref voice) = other.default_voice {
            self.default_voice.clone_from(voice);
        }
        if let Some(ref rate) = other.rate {
            self.rate = *rate;
        }
        if let Some(ref pitch) = other.pitch {
            self.pitch = *pitch;
        }
        if let Some(ref volume) = other.volume {
            self.volume = *volume;
        }
        if let Some(ref ttl) = other.status_ttl_ms {
            self.status_ttl_ms = *ttl;
        }
        if let Some(ref grace) = other.pause_grace_ms {
            self.pause_grace_ms = *grace;
        }
        if let Some(ref url) = other.tools_base_url {
            self.tools_base_url.clone_from(url);
        }
        if let Some(ref port) = other.server_port {
            self.server_port = *port;
        }
    }

    /// Load settings from a JSON file.
    ///
    /// A missing file is not an error; it yields empty settings so effective
    /// values fall back to the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SettingsError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| SettingsError::ParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Persist settings to a JSON file, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SettingsError::WriteFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| SettingsError::ParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        fs::write(path, content).map_err(|e| SettingsError::WriteFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        debug!(path = %path.display(), "settings saved");
        Ok(())
    }
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = set field to None/null
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub default_voice: Option<Option<String>>,
    pub rate: Option<Option<f32>>,
    pub pitch: Option<Option<f32>>,
    pub volume: Option<Option<f32>>,
    pub status_ttl_ms: Option<Option<u64>>,
    pub pause_grace_ms: Option<Option<u64>>,
    pub tools_base_url: Option<Option<String>>,
    pub server_port: Option<Option<u16>>,
}

/// Settings validation and persistence error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Status TTL must be between 500 and 600,000 ms, got {0}")]
    InvalidStatusTtl(u64),

    #[error("Pause grace must be between 100 and 60,000 ms, got {0}")]
    InvalidPauseGrace(u64),

    #[error("Port should be >= 1024 (privileged ports require root), got {0}")]
    InvalidPort(u16),

    #[error("Tools base URL cannot be empty")]
    EmptyToolsUrl,

    #[error("Default voice cannot be empty")]
    EmptyDefaultVoice,

    #[error("Failed to read settings file {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("Failed to write settings file {path}: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("Failed to parse settings file {path}: {reason}")]
    ParseFailed { path: String, reason: String },
}

/// Validate settings values.
///
/// Speech numeric defaults (rate/pitch/volume) are deliberately not validated
/// here; out-of-range values are clamped at utterance construction.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    // Validate status TTL
    if let Some(ttl) = settings.status_ttl_ms {
        if !(500..=600_000).contains(&ttl) {
            return Err(SettingsError::InvalidStatusTtl(ttl));
        }
    }

    // Validate pause grace
    if let Some(grace) = settings.pause_grace_ms {
        if !(100..=60_000).contains(&grace) {
            return Err(SettingsError::InvalidPauseGrace(grace));
        }
    }

    // Validate server port
    if let Some(port) = settings.server_port {
        if port < 1024 {
            return Err(SettingsError::InvalidPort(port));
        }
    }

    // Validate tools base URL if specified
    if settings
        .tools_base_url
        .as_ref()
        .is_some_and(|u| u.trim().is_empty())
    {
        return Err(SettingsError::EmptyToolsUrl);
    }

    // Validate default voice if specified
    if settings
        .default_voice
        .as_ref()
        .is_some_and(|v| v.trim().is_empty())
    {
        return Err(SettingsError::EmptyDefaultVoice);
    }

    Ok(())
}
