//! CLI entry point - the composition root.
//!
//! Settings are resolved once here and handed to handlers; each handler
//! wires up exactly the services its command needs.

use clap::Parser;

use parlo_cli::{Cli, Commands, ToolsCommand, handlers, load_settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before anything reads them
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging; -v raises the default filter to debug
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let settings = load_settings(cli.config.as_deref())?;

    // Dispatch to appropriate handler
    let Some(command) = cli.command else {
        // No command provided - show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Serve {
            port,
            host,
            static_dir,
            tools_url,
        } => {
            let args = handlers::serve::ServeArgs {
                port,
                host,
                static_dir,
                tools_url,
            };
            handlers::serve::execute(settings, args).await?;
        }
        Commands::Speak {
            text,
            voice,
            rate,
            pitch,
            volume,
            pause_after,
        } => {
            let args = handlers::speak::SpeakArgs {
                text,
                voice,
                rate,
                pitch,
                volume,
                pause_after,
            };
            handlers::speak::execute(settings, args).await?;
        }
        Commands::Voices => {
            handlers::voices::execute(settings).await?;
        }
        Commands::Tools { command } => match command {
            ToolsCommand::List => {
                handlers::tools::list()?;
            }
            ToolsCommand::Translate { text, from, to } => {
                handlers::tools::translate(&settings, text, from, to).await?;
            }
            ToolsCommand::Transcribe { file } => {
                handlers::tools::transcribe(&settings, &file).await?;
            }
        },
    }

    Ok(())
}
