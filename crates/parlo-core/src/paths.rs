//! Platform-specific path resolution for configuration data.

use std::env;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// The platform has no resolvable config directory.
    #[error("Could not determine a configuration directory for this platform")]
    NoConfigDir,

    /// Creating the config directory failed.
    #[error("Failed to create directory {path}: {reason}")]
    CreateFailed {
        /// The directory that could not be created.
        path: PathBuf,
        /// Underlying error description.
        reason: String,
    },
}

/// Get the root directory for parlo configuration.
///
/// Resolution order:
/// 1. `PARLO_CONFIG_DIR` environment variable (highest priority)
/// 2. Platform config directory (e.g., `~/.config/parlo`)
pub fn config_root() -> Result<PathBuf, PathError> {
    // 1. Runtime override (highest priority)
    if let Ok(path) = env::var("PARLO_CONFIG_DIR") {
        return Ok(PathBuf::from(path));
    }

    // 2. Platform config directory
    let config_dir = dirs::config_dir().ok_or(PathError::NoConfigDir)?;
    let root = config_dir.join("parlo");

    // Ensure it exists
    if !root.exists() {
        fs::create_dir_all(&root).map_err(|e| PathError::CreateFailed {
            path: root.clone(),
            reason: e.to_string(),
        })?;
    }

    Ok(root)
}

/// Location of the JSON settings file.
pub fn settings_file_path() -> Result<PathBuf, PathError> {
    Ok(config_root()?.join("settings.json"))
}
