//! Client for the summarization service
//!
//! Shared by the `summarize` command and the interactive form. Every failure
//! ends up as a displayable [`Outcome`], never as a panic or an error return.

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;

use crate::config::Settings;

/// Shown when the submitted text is blank.
pub const EMPTY_INPUT_WARNING: &str = "Paste or type some text first.";

/// Shown when the service answers without a `summary` field.
pub const NO_SUMMARY: &str = "No summary returned.";

/// What the user sees after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Blank input, nothing was sent.
    Warning(String),
    Summary(String),
    /// Message already prefixed with `Error: `.
    Error(String),
}

impl Outcome {
    pub fn message(&self) -> &str {
        match self {
            Self::Warning(m) | Self::Summary(m) | Self::Error(m) => m,
        }
    }

    pub fn is_summary(&self) -> bool {
        matches!(self, Self::Summary(_))
    }

    fn error(description: impl std::fmt::Display) -> Self {
        Self::Error(format!("Error: {}", description))
    }
}

/// HTTP client for `POST /summarize/`.
#[derive(Clone)]
pub struct ServiceClient {
    http: Client,
    url: String,
    timeout: Duration,
}

impl ServiceClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let timeout = settings.client_timeout();

        Ok(Self {
            http: Client::builder()
                .timeout(timeout)
                .build()
                .context("Failed to build service HTTP client")?,
            url: settings.client.service_url.trim().to_string(),
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Submit text for summarization.
    pub async fn submit(&self, text: &str) -> Outcome {
        if text.trim().is_empty() {
            return Outcome::Warning(EMPTY_INPUT_WARNING.to_string());
        }

        match self.request_summary(text).await {
            Ok(summary) => Outcome::Summary(summary),
            Err(e) => {
                tracing::debug!("Summarize request failed: {:#}", e);
                Outcome::error(format!("{:#}", e))
            }
        }
    }

    async fn request_summary(&self, text: &str) -> Result<String> {
        let response = self
            .http
            .post(&self.url)
            .form(&[("text", text)])
            .send()
            .await
            .map_err(|e| self.describe(e))?;

        let response = response.error_for_status().map_err(|e| self.describe(e))?;

        let body: Map<String, Value> = response
            .json()
            .await
            .context("Service returned a malformed response")?;

        Ok(summary_from_body(&body))
    }

    fn describe(&self, err: reqwest::Error) -> anyhow::Error {
        if err.is_timeout() {
            anyhow::anyhow!(
                "Request to {} timed out after {}s",
                self.url,
                self.timeout.as_secs()
            )
        } else {
            anyhow::Error::new(err)
        }
    }
}

/// Read the summary from a service response body.
fn summary_from_body(body: &Map<String, Value>) -> String {
    match body.get("summary") {
        None | Some(Value::Null) => NO_SUMMARY.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn summary_field_is_displayed() {
        assert_eq!(summary_from_body(&body(json!({"summary": "- a\n- b"}))), "- a\n- b");
    }

    #[test]
    fn missing_summary_uses_fallback_message() {
        assert_eq!(summary_from_body(&body(json!({"other": 1}))), NO_SUMMARY);
    }

    #[test]
    fn outcome_messages() {
        assert_eq!(Outcome::error("boom").message(), "Error: boom");
        assert!(Outcome::Summary("x".into()).is_summary());
        assert!(!Outcome::Warning("x".into()).is_summary());
    }

    #[tokio::test]
    async fn blank_input_warns_without_network() {
        let mut settings = Settings::default();
        // Nothing listens on port 9; a network call would produce an error instead.
        settings.client.service_url = "http://127.0.0.1:9/summarize/".to_string();
        let client = ServiceClient::from_settings(&settings).unwrap();

        for text in ["", "  ", "\n\t "] {
            assert_eq!(
                client.submit(text).await,
                Outcome::Warning(EMPTY_INPUT_WARNING.to_string())
            );
        }
    }

    #[tokio::test]
    async fn unreachable_service_yields_error_message() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let mut settings = Settings::default();
        settings.client.service_url = format!("http://{addr}/summarize/");
        let client = ServiceClient::from_settings(&settings).unwrap();

        let outcome = client.submit("Hello world. This is a test.").await;
        assert!(matches!(outcome, Outcome::Error(_)));
        assert!(outcome.message().starts_with("Error: "));
    }
}
