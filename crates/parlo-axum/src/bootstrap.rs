//! Axum server bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the Axum web adapter. All concrete implementations are instantiated here.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use parlo_core::ports::{AppEventEmitter, SpeechPort};
use parlo_core::settings::Settings;
use parlo_speech::{SimulatedEngine, SimulatedEngineConfig, SpeechService, SpeechServiceConfig};
use parlo_tools::{DefaultToolsClient, ToolsConfig};

use crate::sse::SseBroadcaster;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Bind address for the HTTP server.
    pub host: String,
    /// Optional path to static assets for SPA serving.
    pub static_dir: Option<PathBuf>,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Application settings driving the speech service and tools client.
    pub settings: Settings,
}

impl ServerConfig {
    /// Create a config from persisted settings, using the effective port.
    #[must_use]
    pub fn from_settings(settings: Settings) -> Self {
        Self {
            port: settings.effective_server_port(),
            host: "0.0.0.0".to_string(),
            static_dir: None,
            cors: CorsConfig::default(),
            settings,
        }
    }

    /// Set the static directory for SPA serving.
    #[must_use]
    pub fn with_static_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(path.into());
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_settings(Settings::default())
    }
}

/// Application context for the Axum adapter.
///
/// This struct holds all initialized services for the web server.
pub struct AppContext {
    /// Speech playback as a trait object; handlers never see the controller.
    pub speech: Arc<dyn SpeechPort>,
    /// Client for the remote AI tool backend.
    pub tools: Arc<DefaultToolsClient>,
    /// SSE broadcaster for real-time events.
    pub sse: Arc<SseBroadcaster>,
}

/// Bootstrap the Axum server with all services.
///
/// Must run inside a Tokio runtime; the speech service spawns its event
/// bridge and catalog listener on construction.
pub fn bootstrap(config: &ServerConfig) -> Result<AppContext> {
    // 1. Create SSE broadcaster for real-time events
    let sse = Arc::new(SseBroadcaster::with_defaults());

    // 2. Create the synthesis engine and speech service with SSE emitter
    let engine = Arc::new(SimulatedEngine::new(SimulatedEngineConfig::default()));
    let speech_config = SpeechServiceConfig::from_settings(&config.settings);
    let speech: Arc<dyn SpeechPort> = SpeechService::new(
        speech_config,
        engine,
        Arc::clone(&sse) as Arc<dyn AppEventEmitter>,
    );

    // 3. Create the tools client pointed at the configured backend
    let tools_config =
        ToolsConfig::new().with_base_url(config.settings.effective_tools_base_url());
    let tools = Arc::new(DefaultToolsClient::new(&tools_config)?);

    tracing::info!(
        tools_base_url = config.settings.effective_tools_base_url(),
        "Axum bootstrap complete"
    );

    Ok(AppContext { speech, tools, sse })
}

/// Start the web server on the configured address.
///
/// If `config.static_dir` is set, serves static assets with SPA fallback.
/// Otherwise, serves only the API endpoints.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    let ctx = bootstrap(&config)?;

    // Choose router based on whether static serving is configured
    let app = if let Some(ref static_dir) = config.static_dir {
        info!("Serving static assets from: {}", static_dir.display());
        crate::routes::create_spa_router(ctx, static_dir, &config.cors)
    } else {
        crate::routes::create_router(ctx, &config.cors)
    };

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;

    if config.static_dir.is_some() {
        info!("parlo server (with UI) listening on http://{}", addr);
    } else {
        info!("parlo server (API only) listening on http://{}", addr);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
