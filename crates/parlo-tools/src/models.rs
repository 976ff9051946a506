//! Wire types for the remote tool backend.
//!
//! Field names follow the backend's snake_case JSON verbatim. Every
//! payload-bearing response carries a `success` flag; the client checks it
//! before handing the payload to callers, so code downstream of
//! `ToolsClient` never needs to inspect `success` or `error` itself.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ── Translation ───────────────────────────────────────────────────────────────

/// Request body for `POST /api/text-translator/translate`.
#[derive(Debug, Clone, Serialize)]
pub struct TranslationRequest {
    /// Text to translate.
    pub text: String,
    /// Source language code; `"auto"` lets the backend detect it.
    pub source_lang: String,
    /// Target language code.
    pub target_lang: String,
}

impl TranslationRequest {
    /// Build a request, defaulting to auto-detected source and English target.
    pub fn new(text: impl Into<String>, source: Option<&str>, target: Option<&str>) -> Self {
        Self {
            text: text.into(),
            source_lang: source.unwrap_or("auto").to_string(),
            target_lang: target.unwrap_or("en").to_string(),
        }
    }
}

/// Response payload for a translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResult {
    #[serde(default, skip_serializing)]
    pub(crate) success: bool,
    #[serde(default, skip_serializing)]
    pub(crate) error: Option<String>,
    /// The translated text.
    #[serde(default)]
    pub translated_text: String,
    /// Source language the backend used (may be the detected one).
    #[serde(default)]
    pub source_language: String,
    /// Target language.
    #[serde(default)]
    pub target_language: String,
    /// Which upstream translation service produced the result.
    #[serde(default)]
    pub service: String,
    /// Backend-reported confidence, 0.0 when unknown.
    #[serde(default)]
    pub confidence: f64,
}

/// Response payload for `GET /api/text-translator/languages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagesResponse {
    #[serde(default, skip_serializing)]
    pub(crate) success: bool,
    #[serde(default, skip_serializing)]
    pub(crate) error: Option<String>,
    /// Language code → display name.
    #[serde(default)]
    pub languages: HashMap<String, String>,
}

// ── Image generation ──────────────────────────────────────────────────────────

/// Response payload for `POST /api/text-to-image/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageGenerationResult {
    #[serde(default, skip_serializing)]
    pub(crate) success: bool,
    #[serde(default, skip_serializing)]
    pub(crate) error: Option<String>,
    /// Base64-encoded image bytes.
    #[serde(default)]
    pub image_data: String,
    /// Which generator model produced the image.
    #[serde(default)]
    pub model: String,
    /// The (possibly style-enhanced) prompt the backend actually used.
    #[serde(default)]
    pub prompt: String,
    /// Style the image was rendered in.
    #[serde(default)]
    pub style: String,
    /// Size preset the image was rendered at.
    #[serde(default)]
    pub size: String,
}

/// Response payload for `GET /api/text-to-image/options`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageOptions {
    #[serde(default, skip_serializing)]
    pub(crate) success: bool,
    #[serde(default, skip_serializing)]
    pub(crate) error: Option<String>,
    /// Style preset → prompt suffix.
    #[serde(default)]
    pub styles: HashMap<String, String>,
    /// Size preset → "WxH" dimension string.
    #[serde(default)]
    pub sizes: HashMap<String, String>,
}

// ── Transcription ─────────────────────────────────────────────────────────────

/// Response payload for `POST /api/stt/transcribe`.
///
/// This endpoint signals success with `"status": "success"` rather than the
/// `success` flag the other endpoints use; failures arrive as 4xx/5xx
/// bodies, never in a 200 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionResult {
    /// The transcribed text.
    #[serde(default)]
    pub text: String,
    /// Language the backend detected in the audio.
    #[serde(default)]
    pub detected_language: String,
    /// `"success"` on the happy path.
    #[serde(default)]
    pub status: String,
}

// ── Face and voice detection ──────────────────────────────────────────────────

/// Response payload for `POST /api/detector/analyze`.
///
/// Like transcription, this endpoint reports `"status": "success"` rather
/// than a `success` flag; failures arrive as 4xx/5xx bodies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceVoiceDetectionResult {
    /// Whether at least one face was found in the video.
    #[serde(default)]
    pub faces_detected: bool,
    /// Whether voice activity was found on the audio track.
    #[serde(default)]
    pub voice_detected: bool,
    /// Human-readable summary of what was detected.
    #[serde(default)]
    pub message: String,
    /// `"success"` on the happy path.
    #[serde(default)]
    pub status: String,
}

// ── Confidence analysis ───────────────────────────────────────────────────────

/// Response payload for `POST /api/confidence/analyze`.
///
/// Scores are on a 0-10 scale. The happy path carries no `success` flag;
/// failures arrive as 4xx/5xx bodies with an `error` string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceReport {
    /// Combined audio and visual score.
    #[serde(default)]
    pub overall_score: f64,
    /// Score for the audio track alone.
    #[serde(default)]
    pub audio_score: f64,
    /// Score for the visual track alone.
    #[serde(default)]
    pub visual_score: f64,
    /// Per-metric breakdown (volume, eye contact, posture, and so on).
    #[serde(default)]
    pub detailed_scores: HashMap<String, f64>,
    /// Backend summary line.
    #[serde(default)]
    pub message: String,
}

// ── Object detection ──────────────────────────────────────────────────────────

/// One detected object in an analyzed image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectedObject {
    /// Class label (e.g. `"person"`).
    #[serde(default)]
    pub class: String,
    /// Detection confidence in \[0, 1\].
    #[serde(default)]
    pub confidence: f64,
    /// Bounding box as `[x, y, width, height]` in pixels.
    #[serde(default)]
    pub bbox: Vec<i64>,
}

/// Response payload for `POST /api/object-detection/analyze`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectDetectionResult {
    #[serde(default, skip_serializing)]
    pub(crate) success: bool,
    #[serde(default, skip_serializing)]
    pub(crate) error: Option<String>,
    /// Everything the detector found.
    #[serde(default)]
    pub objects: Vec<DetectedObject>,
    /// Total detection count, as reported by the backend.
    #[serde(default)]
    pub total_objects: usize,
    /// Base64-encoded copy of the image with detections drawn in, when the
    /// backend produced one.
    #[serde(default)]
    pub annotated_image: Option<String>,
}

// ── Envelope check ────────────────────────────────────────────────────────────

/// Responses that carry the backend's `success`/`error` envelope.
pub(crate) trait Enveloped {
    fn success(&self) -> bool;
    fn error_message(&self) -> Option<&str>;
}

macro_rules! impl_enveloped {
    ($($ty:ty),+ $(,)?) => {
        $(impl Enveloped for $ty {
            fn success(&self) -> bool {
                self.success
            }
            fn error_message(&self) -> Option<&str> {
                self.error.as_deref()
            }
        })+
    };
}

impl_enveloped!(
    TranslationResult,
    LanguagesResponse,
    ImageGenerationResult,
    ImageOptions,
    ObjectDetectionResult,
);
