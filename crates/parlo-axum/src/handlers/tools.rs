//! Axum handlers for the `/api/tools/*` endpoints.
//!
//! The tool catalog is served locally; translation and image generation
//! proxy to the remote tool backend through the shared client. Upstream
//! failures surface through the `From<ToolsError> for HttpError` mapping.

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use parlo_tools::{
    CategorySummary, ImageGenerationResult, ImageOptions, LanguagesResponse, Tool,
    TranslationRequest, TranslationResult,
};

use crate::error::HttpError;
use crate::state::AppState;

// ── Request body shapes ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub text: String,
    /// Source language code; omit for auto-detection.
    pub source_lang: Option<String>,
    /// Target language code; defaults to English.
    pub target_lang: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageRequest {
    pub prompt: String,
    pub style: Option<String>,
    pub size: Option<String>,
    pub model: Option<String>,
}

// ── Response body shapes ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub tools: Vec<Tool>,
    pub categories: Vec<CategorySummary>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// `GET /api/tools`
pub async fn catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        tools: parlo_tools::tools(),
        categories: parlo_tools::categories(),
    })
}

/// `POST /api/tools/translate`
pub async fn translate(
    State(state): State<AppState>,
    Json(req): Json<TranslateRequest>,
) -> Result<Json<TranslationResult>, HttpError> {
    if req.text.trim().is_empty() {
        return Err(HttpError::Validation("No text provided".to_string()));
    }
    let request = TranslationRequest::new(
        req.text,
        req.source_lang.as_deref(),
        req.target_lang.as_deref(),
    );
    Ok(Json(state.tools.translate(&request).await?))
}

/// `GET /api/tools/languages`
pub async fn languages(
    State(state): State<AppState>,
) -> Result<Json<LanguagesResponse>, HttpError> {
    Ok(Json(state.tools.languages().await?))
}

/// `POST /api/tools/image`
pub async fn generate_image(
    State(state): State<AppState>,
    Json(req): Json<GenerateImageRequest>,
) -> Result<Json<ImageGenerationResult>, HttpError> {
    if req.prompt.trim().is_empty() {
        return Err(HttpError::Validation("No prompt provided".to_string()));
    }
    let result = state
        .tools
        .generate_image(
            &req.prompt,
            req.style.as_deref(),
            req.size.as_deref(),
            req.model.as_deref(),
        )
        .await?;
    Ok(Json(result))
}

/// `GET /api/tools/image/options`
pub async fn image_options(
    State(state): State<AppState>,
) -> Result<Json<ImageOptions>, HttpError> {
    Ok(Json(state.tools.image_options().await?))
}
