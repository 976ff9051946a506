//! Main commands enum and primary subcommands.
//!
//! This module defines the available commands for the CLI tool.

use std::path::PathBuf;

use clap::Subcommand;

/// Available commands for the parlo speech tool.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP adapter over the simulated engine
    Serve {
        /// Port to listen on (defaults to the configured server port)
        #[arg(short, long)]
        port: Option<u16>,
        /// Bind address
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Serve a built frontend from this directory with SPA fallback
        #[arg(long)]
        static_dir: Option<PathBuf>,
        /// Override the remote tool backend base URL
        #[arg(long)]
        tools_url: Option<String>,
    },

    /// Speak a piece of text, printing state transitions as they happen
    Speak {
        /// Text to synthesize
        text: String,
        /// Voice identity to use (defaults to the configured voice)
        #[arg(long)]
        voice: Option<String>,
        /// Speaking rate multiplier (clamped to 0.5-2.0)
        #[arg(long)]
        rate: Option<f32>,
        /// Voice pitch (clamped to 0.0-2.0)
        #[arg(long)]
        pitch: Option<f32>,
        /// Playback volume (clamped to 0.0-1.0)
        #[arg(long)]
        volume: Option<f32>,
        /// Pause playback after this many seconds, then resume
        #[arg(long)]
        pause_after: Option<f64>,
    },

    /// Print the voice catalog with the default marked
    Voices,

    /// Remote AI tool operations
    Tools {
        #[command(subcommand)]
        command: ToolsCommand,
    },
}

/// Subcommands for the remote AI tools.
#[derive(Subcommand)]
pub enum ToolsCommand {
    /// Print the tool catalog grouped by category
    List,

    /// Translate text via the remote backend
    Translate {
        /// Text to translate
        text: String,
        /// Source language code (auto-detected when omitted)
        #[arg(long = "from")]
        from: Option<String>,
        /// Target language code (defaults to English)
        #[arg(long = "to")]
        to: Option<String>,
    },

    /// Transcribe an audio file via the remote backend
    Transcribe {
        /// Path to the audio file (mono 16-bit PCM WAV)
        file: PathBuf,
    },
}
