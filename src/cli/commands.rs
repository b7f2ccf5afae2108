//! CLI command implementations

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Read;
use std::path::PathBuf;

use crate::cli::args::{Cli, ConfigCommand};
use crate::client::{Outcome, ServiceClient};
use crate::config::Settings;
use crate::TextsumError;

/// Run the summarization service
pub async fn serve(settings: &Settings, bind: Option<String>) -> Result<()> {
    let mut settings = settings.clone();
    if let Some(bind) = bind {
        settings.server.bind = bind;
    }

    crate::server::serve(&settings).await
}

/// Summarize text through the service and print the outcome.
///
/// Summaries go to stdout, warnings and errors to stderr.
pub async fn summarize_text(
    settings: &Settings,
    text: Option<String>,
    file: Option<PathBuf>,
    url: Option<String>,
) -> Result<Outcome> {
    let mut settings = settings.clone();
    if let Some(url) = url {
        settings.client.service_url = url;
    }

    let text = read_input(text, file)?;
    let client = ServiceClient::from_settings(&settings)?;

    if !text.trim().is_empty() {
        eprintln!("Generating summary...");
    }

    let outcome = client.submit(&text).await;
    match &outcome {
        Outcome::Summary(summary) => println!("{}", summary),
        other => eprintln!("{}", other.message()),
    }

    Ok(outcome)
}

fn read_input(text: Option<String>, file: Option<PathBuf>) -> crate::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if let Some(path) = file {
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(settings)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                return Err(TextsumError::Config(format!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                ))
                .into());
            }
            Settings::write_default(&path)
                .with_context(|| format!("Failed to write config file: {}", path.display()))?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Print completion script for the requested shell to stdout.
pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_text_wins() {
        let text = read_input(Some("  keep  ".to_string()), None).unwrap();
        assert_eq!(text, "  keep  ");
    }

    #[test]
    fn text_is_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "Hello world.\n").unwrap();

        assert_eq!(read_input(None, Some(path)).unwrap(), "Hello world.\n");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_input(None, Some(PathBuf::from("/nonexistent/textsum.txt"))).unwrap_err();
        assert!(matches!(err, TextsumError::Io(_)));
    }
}
