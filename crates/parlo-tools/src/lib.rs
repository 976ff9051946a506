#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

mod catalog;
mod client;
mod config;
mod error;
mod http;
mod models;

pub use catalog::{CategorySummary, Tool, ToolCategory, categories, tools};
pub use client::{DefaultToolsClient, ToolsClient};
pub use config::ToolsConfig;
pub use error::{ToolsError, ToolsResult};
pub use models::{
    ConfidenceReport, DetectedObject, FaceVoiceDetectionResult, ImageGenerationResult,
    ImageOptions, LanguagesResponse, ObjectDetectionResult, TranscriptionResult,
    TranslationRequest, TranslationResult,
};
