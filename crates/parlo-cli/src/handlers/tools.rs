//! Tools command handlers.
//!
//! `list` is served from the local catalog; `translate` and `transcribe`
//! call the remote tool backend.

use std::path::Path;

use anyhow::{Context, Result};

use parlo_core::settings::Settings;
use parlo_tools::{DefaultToolsClient, ToolsConfig, TranslationRequest};

fn client(settings: &Settings) -> Result<DefaultToolsClient> {
    let config = ToolsConfig::new().with_base_url(settings.effective_tools_base_url());
    DefaultToolsClient::new(&config).context("invalid tools backend URL")
}

/// Execute `tools list`: print the catalog grouped by category.
pub fn list() -> Result<()> {
    let tools = parlo_tools::tools();
    for category in parlo_tools::categories() {
        if category.id == "all" {
            continue;
        }
        println!("{} ({})", category.name, category.count);
        for tool in tools.iter().filter(|t| t.category.id() == category.id) {
            let marker = if tool.available { "" } else { " [coming soon]" };
            println!("  {:<20} {}{}", tool.id, tool.description, marker);
        }
        println!();
    }
    Ok(())
}

/// Execute `tools translate`.
pub async fn translate(
    settings: &Settings,
    text: String,
    from: Option<String>,
    to: Option<String>,
) -> Result<()> {
    let client = client(settings)?;
    let request = TranslationRequest::new(text, from.as_deref(), to.as_deref());
    let result = client
        .translate(&request)
        .await
        .context("translation failed")?;

    println!("{}", result.translated_text);
    println!(
        "  ({} -> {}, via {}, confidence {:.2})",
        result.source_language, result.target_language, result.service, result.confidence
    );
    Ok(())
}

/// Execute `tools transcribe`.
pub async fn transcribe(settings: &Settings, file: &Path) -> Result<()> {
    let bytes = std::fs::read(file)
        .with_context(|| format!("failed to read audio file {}", file.display()))?;
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("audio.wav");

    let client = client(settings)?;
    let result = client
        .transcribe(file_name, bytes)
        .await
        .context("transcription failed")?;

    println!("{}", result.text);
    if !result.detected_language.is_empty() {
        println!("  (detected language: {})", result.detected_language);
    }
    Ok(())
}
