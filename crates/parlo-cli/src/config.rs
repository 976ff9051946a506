//! Settings resolution for the CLI.
//!
//! Resolution order for the settings file: `--config` flag (or the
//! `PARLO_CONFIG` variable, which clap maps onto the same flag), then the
//! platform default location. After loading, operational environment
//! variables override file values.

use std::env;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use parlo_core::paths::settings_file_path;
use parlo_core::settings::{Settings, validate_settings};

/// Load and validate settings, applying environment overrides.
pub fn load_settings(override_path: Option<&Path>) -> Result<Settings> {
    let mut settings = match override_path {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => {
            let path = settings_file_path().context("could not resolve settings location")?;
            Settings::load_from(&path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?
        }
    };

    apply_env_overrides(&mut settings);
    validate_settings(&settings).context("invalid settings")?;
    Ok(settings)
}

/// Environment variables beat file values for operational endpoints.
fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(url) = env::var("PARLO_TOOLS_URL") {
        if !url.trim().is_empty() {
            debug!(url, "tools base URL overridden from environment");
            settings.tools_base_url = Some(url);
        }
    }
    if let Ok(port) = env::var("PARLO_PORT") {
        match port.parse::<u16>() {
            Ok(port) => settings.server_port = Some(port),
            Err(_) => debug!(port, "ignoring unparseable PARLO_PORT"),
        }
    }
}
