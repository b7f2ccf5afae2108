use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::config::Settings;
use crate::llm::client::{GenerateRequest, ModelBackend, ModelError};
use crate::llm::envelope::Envelope;

/// Client for an Ollama-compatible `/api/generate` endpoint.
pub struct OllamaClient {
    http: Client,
    model: String,
    endpoint: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let endpoint = settings.model.endpoint.trim().to_string();
        if endpoint.is_empty() {
            anyhow::bail!(
                "Model endpoint is missing. Set model.endpoint in config or TEXTSUM_MODEL_ENDPOINT."
            );
        }

        let model = settings.model.name.trim().to_string();
        if model.is_empty() {
            anyhow::bail!(
                "Model name is missing. Set model.name in config or TEXTSUM_MODEL_NAME."
            );
        }

        let timeout = settings.model_timeout();

        Ok(Self {
            http: Client::builder()
                .timeout(timeout)
                .build()
                .context("Failed to build model server HTTP client")?,
            model,
            endpoint,
            timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn classify(&self, err: reqwest::Error) -> ModelError {
        if err.is_timeout() {
            ModelError::Timeout(self.timeout.as_secs())
        } else if let Some(status) = err.status() {
            ModelError::Status(status.as_u16())
        } else {
            ModelError::Unavailable(err.to_string())
        }
    }
}

#[async_trait]
impl ModelBackend for OllamaClient {
    async fn generate(&self, prompt: &str) -> std::result::Result<Envelope, ModelError> {
        let body = GenerateRequest::new(&self.model, prompt);

        tracing::debug!(
            model = %self.model,
            endpoint = %self.endpoint,
            prompt_chars = prompt.chars().count(),
            "Sending generate request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let response = response.error_for_status().map_err(|e| self.classify(e))?;

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;

        serde_json::from_slice::<Envelope>(&bytes)
            .map_err(|e| ModelError::Malformed(e.to_string()))
    }
}
