//! The static tool catalog backing the dashboard.
//!
//! Pure data, no I/O. The dashboard renders this list and routes each tool
//! to its page; `available: false` marks entries shown as "coming soon".

use serde::Serialize;

/// Dashboard grouping for a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    Text,
    Media,
    Code,
    Productivity,
}

impl ToolCategory {
    /// Stable identifier used in category filters.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Media => "media",
            Self::Code => "code",
            Self::Productivity => "productivity",
        }
    }

    /// Display name for the category.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Text => "Text & Language",
            Self::Media => "Media & Creative",
            Self::Code => "Development",
            Self::Productivity => "Productivity",
        }
    }
}

/// One entry in the tool catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    /// Stable identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-sentence description for the dashboard card.
    pub description: &'static str,
    /// Frontend route path.
    pub path: &'static str,
    /// Dashboard grouping.
    pub category: ToolCategory,
    /// Whether the tool is usable (false renders as "coming soon").
    pub available: bool,
}

/// A category with its computed tool count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: &'static str,
    pub name: &'static str,
    pub count: usize,
}

/// The full tool catalog, in dashboard display order.
#[must_use]
pub fn tools() -> Vec<Tool> {
    vec![
        Tool {
            id: "chatbot",
            name: "AI Chatbot",
            description: "Intelligent conversational AI assistant for questions, brainstorming, and creative tasks.",
            path: "/chatbot",
            category: ToolCategory::Text,
            available: true,
        },
        Tool {
            id: "text-to-image",
            name: "Text to Image",
            description: "Generate stunning images from text descriptions using advanced AI models.",
            path: "/text-to-image",
            category: ToolCategory::Media,
            available: true,
        },
        Tool {
            id: "translator",
            name: "Language Translator",
            description: "Translate text between 100+ languages with context-aware AI translation.",
            path: "/translator",
            category: ToolCategory::Text,
            available: true,
        },
        Tool {
            id: "summarizer",
            name: "Text Summarizer",
            description: "Condense long articles, documents, and content into key insights and summaries.",
            path: "/summarizer",
            category: ToolCategory::Productivity,
            available: true,
        },
        Tool {
            id: "content-generator",
            name: "Content Generator",
            description: "Create engaging blog posts, marketing copy, and creative content with AI assistance.",
            path: "/content-generator",
            category: ToolCategory::Text,
            available: true,
        },
        Tool {
            id: "code-assistant",
            name: "Code Assistant",
            description: "Get help with coding, debugging, and learning programming concepts across languages.",
            path: "/code-assistant",
            category: ToolCategory::Code,
            available: true,
        },
        Tool {
            id: "music-generator",
            name: "Music Generator",
            description: "Create original music compositions and melodies using AI technology.",
            path: "/music-generator",
            category: ToolCategory::Media,
            available: false,
        },
        Tool {
            id: "video-editor",
            name: "AI Video Editor",
            description: "Edit and enhance videos with AI-powered tools for cutting, effects, and optimization.",
            path: "/video-editor",
            category: ToolCategory::Media,
            available: false,
        },
        Tool {
            id: "tts",
            name: "Text to Speech",
            description: "Convert text into natural-sounding speech with a variety of voices and languages.",
            path: "/tts",
            category: ToolCategory::Media,
            available: true,
        },
        Tool {
            id: "stt",
            name: "Speech to Text",
            description: "Transcribe audio or video to text using advanced AI models.",
            path: "/stt",
            category: ToolCategory::Media,
            available: true,
        },
        Tool {
            id: "confidence-analyzer",
            name: "Confidence Analyzer",
            description: "Analyze your speaking confidence and presentation skills from video recordings.",
            path: "/confidence-analyzer",
            category: ToolCategory::Productivity,
            available: true,
        },
        Tool {
            id: "face-voice-detector",
            name: "Face & Voice Detector",
            description: "Detect faces and voice activity in video files for content analysis.",
            path: "/face-voice-detector",
            category: ToolCategory::Media,
            available: true,
        },
    ]
}

/// Category summaries with computed counts, "All Tools" first.
#[must_use]
pub fn categories() -> Vec<CategorySummary> {
    let all = tools();
    let count_in = |category: ToolCategory| all.iter().filter(|t| t.category == category).count();

    vec![
        CategorySummary {
            id: "all",
            name: "All Tools",
            count: all.len(),
        },
        CategorySummary {
            id: ToolCategory::Text.id(),
            name: ToolCategory::Text.display_name(),
            count: count_in(ToolCategory::Text),
        },
        CategorySummary {
            id: ToolCategory::Media.id(),
            name: ToolCategory::Media.display_name(),
            count: count_in(ToolCategory::Media),
        },
        CategorySummary {
            id: ToolCategory::Code.id(),
            name: ToolCategory::Code.display_name(),
            count: count_in(ToolCategory::Code),
        },
        CategorySummary {
            id: ToolCategory::Productivity.id(),
            name: ToolCategory::Productivity.display_name(),
            count: count_in(ToolCategory::Productivity),
        },
    ]
}
