//! Serve command handler.
//!
//! Runs the Axum adapter over the simulated engine.

use std::path::PathBuf;

use anyhow::Result;

use parlo_axum::{ServerConfig, start_server};
use parlo_core::settings::Settings;

/// Arguments accepted by the serve command.
pub struct ServeArgs {
    pub port: Option<u16>,
    pub host: String,
    pub static_dir: Option<PathBuf>,
    pub tools_url: Option<String>,
}

/// Execute the serve command.
pub async fn execute(mut settings: Settings, args: ServeArgs) -> Result<()> {
    if let Some(url) = args.tools_url {
        settings.tools_base_url = Some(url);
    }
    if let Some(port) = args.port {
        settings.server_port = Some(port);
    }

    let mut config = ServerConfig::from_settings(settings);
    config.host = args.host;
    config.static_dir = args.static_dir;

    let port = config.port;
    if let Some(ref dir) = config.static_dir {
        println!();
        println!("  parlo server starting...");
        println!();
        println!("  Serving UI from: {}", dir.display());
        println!("  Local:   http://localhost:{port}");
        println!("  Network: http://{}:{port}", config.host);
        println!();
        println!("  Press Ctrl+C to stop");
        println!();
    } else {
        println!();
        println!("  parlo server starting (API only)...");
        println!();
        println!("  API: http://localhost:{port}");
        println!();
        println!("  Tip: Use --static-dir to serve a frontend build");
        println!();
    }

    start_server(config).await?;
    Ok(())
}
