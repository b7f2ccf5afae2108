use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::Settings;
use crate::llm::envelope::Envelope;
use crate::llm::ollama::OllamaClient;

/// Body of a generate call to the model server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    /// Always false: the caller waits for one complete response.
    pub stream: bool,
}

impl<'a> GenerateRequest<'a> {
    pub fn new(model: &'a str, prompt: &'a str) -> Self {
        Self {
            model,
            prompt,
            stream: false,
        }
    }
}

/// Failure of a model server call.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model server unavailable: {0}")]
    Unavailable(String),

    #[error("Model server timed out after {0}s")]
    Timeout(u64),

    #[error("Model server returned status {0}")]
    Status(u16),

    #[error("Malformed model server response: {0}")]
    Malformed(String),
}

/// A text-generation backend.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> std::result::Result<Envelope, ModelError>;
}

/// Build the model backend from runtime settings.
pub fn build_backend(settings: &Settings) -> Result<Arc<dyn ModelBackend>> {
    Ok(Arc::new(OllamaClient::from_settings(settings)?))
}
