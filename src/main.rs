//! textsum - Summarize text into bullet points through a local LLM server
//!
//! Entry point for the textsum CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use textsum::cli::{Cli, Commands};
use textsum::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        textsum::cli::commands::print_completions(shell);
        return Ok(());
    }

    // Load configuration only for runtime commands.
    let settings = Settings::load()?;

    // Initialize logging
    let default_level = if cli.verbose {
        "debug".to_string()
    } else {
        settings.general.log_level.clone()
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Execute command
    match cli.command {
        Commands::Serve { bind } => {
            textsum::cli::commands::serve(&settings, bind).await?;
        }
        Commands::Summarize { text, file, url } => {
            let outcome =
                textsum::cli::commands::summarize_text(&settings, text, file, url).await?;
            if !outcome.is_summary() {
                std::process::exit(1);
            }
        }
        Commands::Form => {
            textsum::tui::run(&settings).await?;
        }
        Commands::Config(config_cmd) => {
            textsum::cli::commands::config_command(&settings, config_cmd)?;
        }
        Commands::Completions { .. } => unreachable!(),
    }

    Ok(())
}
