//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface definition for the parlo speech tool.
///
/// This is the top-level parser that handles global options and dispatches
/// to subcommands.
#[derive(Parser)]
#[command(name = "parlo")]
#[command(about = "Speech playback controller with remote AI tools")]
#[command(version)]
pub struct Cli {
    /// Path to the settings file for this invocation
    #[arg(long = "config", global = true, env = "PARLO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        // Verify the CLI parser can be constructed
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from(["parlo", "--verbose", "--config", "/tmp/settings.json", "voices"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/settings.json")));
    }

    #[test]
    fn test_speak_args() {
        let cli = Cli::parse_from([
            "parlo",
            "speak",
            "hello there",
            "--voice",
            "Daniel",
            "--rate",
            "1.5",
            "--pause-after",
            "0.5",
        ]);
        match cli.command {
            Some(Commands::Speak {
                text,
                voice,
                rate,
                pause_after,
                ..
            }) => {
                assert_eq!(text, "hello there");
                assert_eq!(voice.as_deref(), Some("Daniel"));
                assert_eq!(rate, Some(1.5));
                assert_eq!(pause_after, Some(0.5));
            }
            _ => panic!("expected speak command"),
        }
    }
}
