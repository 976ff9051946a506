//! Client for the remote AI-tool backend.
//!
//! Each operation maps to one backend endpoint. The client joins endpoint
//! paths onto the configured base URL, performs the exchange through the
//! injected [`HttpBackend`], and unwraps the backend's success/error
//! envelope so callers only ever see a payload or a [`ToolsError`].

use url::Url;

use crate::config::ToolsConfig;
use crate::error::{ToolsError, ToolsResult};
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::{
    ConfidenceReport, Enveloped, FaceVoiceDetectionResult, ImageGenerationResult, ImageOptions,
    LanguagesResponse, ObjectDetectionResult, TranscriptionResult, TranslationRequest,
    TranslationResult,
};

// ============================================================================
// Type Aliases
// ============================================================================

/// Default tools client using the reqwest HTTP backend.
pub type DefaultToolsClient = ToolsClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the remote AI-tool backend.
///
/// Generic over an HTTP backend for testing; production code uses
/// [`DefaultToolsClient`].
pub struct ToolsClient<B: HttpBackend> {
    backend: B,
    base_url: Url,
}

impl DefaultToolsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &ToolsConfig) -> ToolsResult<Self> {
        let base_url = Url::parse(&config.base_url)?;
        Ok(Self {
            backend: ReqwestBackend::new(config),
            base_url,
        })
    }
}

impl<B: HttpBackend> ToolsClient<B> {
    /// Create a client with a custom backend.
    #[cfg(test)]
    pub(crate) fn with_backend(base_url: &str, backend: B) -> Self {
        Self {
            backend,
            base_url: Url::parse(base_url).expect("test base URL is valid"),
        }
    }

    fn endpoint(&self, path: &str) -> ToolsResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Translate text between languages.
    ///
    /// The backend answers translation failures inside a 200 body with
    /// `"success": false`, so the envelope check here is load-bearing.
    pub async fn translate(&self, request: &TranslationRequest) -> ToolsResult<TranslationResult> {
        let url = self.endpoint("/api/text-translator/translate")?;
        let body = serde_json::to_value(request)?;
        let result: TranslationResult = self.backend.post_json(&url, &body).await?;
        check_envelope(result)
    }

    /// List the languages the translator supports.
    pub async fn languages(&self) -> ToolsResult<LanguagesResponse> {
        let url = self.endpoint("/api/text-translator/languages")?;
        let result: LanguagesResponse = self.backend.get_json(&url).await?;
        check_envelope(result)
    }

    /// Generate an image from a text prompt.
    pub async fn generate_image(
        &self,
        prompt: &str,
        style: Option<&str>,
        size: Option<&str>,
        model: Option<&str>,
    ) -> ToolsResult<ImageGenerationResult> {
        let url = self.endpoint("/api/text-to-image/generate")?;
        let body = serde_json::json!({
            "prompt": prompt,
            "style": style.unwrap_or("realistic"),
            "size": size.unwrap_or("square"),
            "model": model.unwrap_or("auto"),
        });
        let result: ImageGenerationResult = self.backend.post_json(&url, &body).await?;
        check_envelope(result)
    }

    /// List supported image styles and size presets.
    pub async fn image_options(&self) -> ToolsResult<ImageOptions> {
        let url = self.endpoint("/api/text-to-image/options")?;
        let result: ImageOptions = self.backend.get_json(&url).await?;
        check_envelope(result)
    }

    /// Transcribe an audio file (mono 16-bit PCM WAV).
    pub async fn transcribe(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ToolsResult<TranscriptionResult> {
        let url = self.endpoint("/api/stt/transcribe")?;
        self.backend
            .post_multipart(&url, "audio", file_name, bytes)
            .await
    }

    /// Detect faces and voice activity in a video file.
    pub async fn detect_face_and_voice(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ToolsResult<FaceVoiceDetectionResult> {
        let url = self.endpoint("/api/detector/analyze")?;
        self.backend
            .post_multipart(&url, "video", file_name, bytes)
            .await
    }

    /// Score speaking confidence from a video recording.
    pub async fn analyze_confidence(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ToolsResult<ConfidenceReport> {
        let url = self.endpoint("/api/confidence/analyze")?;
        self.backend
            .post_multipart(&url, "video", file_name, bytes)
            .await
    }

    /// Analyze an image for objects.
    pub async fn detect_objects(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ToolsResult<ObjectDetectionResult> {
        let url = self.endpoint("/api/object-detection/analyze")?;
        let result: ObjectDetectionResult = self
            .backend
            .post_multipart(&url, "image", file_name, bytes)
            .await?;
        check_envelope(result)
    }
}

/// Reject `"success": false` payloads, surfacing the backend's message.
fn check_envelope<T: Enveloped>(result: T) -> ToolsResult<T> {
    if result.success() {
        Ok(result)
    } else {
        Err(ToolsError::Backend {
            status: 200,
            message: result
                .error_message()
                .unwrap_or("tool backend reported failure without a reason")
                .to_string(),
        })
    }
}
