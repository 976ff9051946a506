//! Route definitions and router construction.
//!
//! This module defines the HTTP routes and creates the main router.
//! Handlers delegate to the speech port and the tools client.

use axum::Router;
use axum::routing::{get, post};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::bootstrap::{AppContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Build all API routes without `/api` prefix (for nesting under /api).
///
/// Returns a router typed as `Router<AppState>` (state inferred from handlers)
/// but WITHOUT `.with_state()` applied. The caller must apply `.with_state()`
/// before nesting.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        // Health
        .route("/health", get(health_check))
        // Speech playback API
        .route("/speech/speak", post(handlers::speech::speak))
        .route("/speech/pause", post(handlers::speech::pause))
        .route("/speech/resume", post(handlers::speech::resume))
        .route("/speech/stop", post(handlers::speech::stop))
        .route("/speech/state", get(handlers::speech::state))
        .route("/speech/status", get(handlers::speech::status))
        .route("/speech/voices", get(handlers::speech::voices))
        .route(
            "/speech/voices/refresh",
            post(handlers::speech::refresh_voices),
        )
        // Tools API
        .route("/tools", get(handlers::tools::catalog))
        .route("/tools/translate", post(handlers::tools::translate))
        .route("/tools/languages", get(handlers::tools::languages))
        .route("/tools/image", post(handlers::tools::generate_image))
        .route("/tools/image/options", get(handlers::tools::image_options))
        // Events (SSE)
        .route("/events", get(handlers::events::stream))
}

/// Create the main Axum router with all API routes.
///
/// This creates the API routes only. For serving static assets,
/// use [`create_spa_router`] which includes both API routes and
/// static file serving with SPA fallback.
pub fn create_router(ctx: AppContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new().nest("/api", api_routes().with_state(state).layer(cors))
}

/// Create a router with API routes and static asset serving.
///
/// This creates a complete SPA-ready router that:
/// 1. Serves API routes under `/api/*`
/// 2. Serves static assets from `static_dir` for matching files
/// 3. Falls back to `index.html` for client-side routing (SPA mode)
pub fn create_spa_router<P: AsRef<Path>>(
    ctx: AppContext,
    static_dir: P,
    cors_config: &CorsConfig,
) -> Router {
    let static_path = static_dir.as_ref();
    let index_path = static_path.join("index.html");

    // Static file serving with SPA fallback to index.html for unmatched paths
    let serve_dir = ServeDir::new(static_path).fallback(ServeFile::new(&index_path));

    // API routes take priority, then fallback to static/SPA serving
    let api = create_router(ctx, cors_config);
    api.fallback_service(serve_dir)
}

/// Health check endpoint.
pub(crate) async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "parlo",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
