//! textsum - Summarize text into bullet points through a local LLM server
//!
//! Ships the summarization service (`textsum serve`) and its clients: a
//! one-shot command and an interactive terminal form.

pub mod cli;
pub mod client;
pub mod config;
pub mod llm;
pub mod server;
pub mod tui;

use thiserror::Error;

/// Main error type for textsum
#[derive(Error, Debug)]
pub enum TextsumError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TextsumError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "textsum";
