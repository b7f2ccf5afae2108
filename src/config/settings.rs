//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Summarization service settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Model server settings
    #[serde(default)]
    pub model: ModelSettings,

    /// Form client settings
    #[serde(default)]
    pub client: ClientSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Address the service listens on
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Browser origins allowed to call the service
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Generate endpoint of the model server
    #[serde(default = "default_model_endpoint")]
    pub endpoint: String,

    /// Model name sent with every request
    #[serde(default = "default_model_name")]
    pub name: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Summarization endpoint the client posts to
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:8501".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

fn default_model_endpoint() -> String {
    "http://localhost:11434/api/generate".to_string()
}

fn default_model_name() -> String {
    "llama3.2:latest".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_service_url() -> String {
    "http://localhost:8000/summarize/".to_string()
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            endpoint: default_model_endpoint(),
            name: default_model_name(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::debug!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Parse settings from TOML, filling missing keys with defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        override_from_env(&mut self.model.endpoint, "TEXTSUM_MODEL_ENDPOINT");
        override_from_env(&mut self.model.name, "TEXTSUM_MODEL_NAME");
        override_from_env(&mut self.client.service_url, "TEXTSUM_SERVICE_URL");
        override_from_env(&mut self.server.bind, "TEXTSUM_BIND");
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "textsum", "textsum")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &PathBuf) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Timeout for the outbound model server call
    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model.timeout_secs)
    }

    /// Timeout for the client's call to the summarization service
    pub fn client_timeout(&self) -> Duration {
        Duration::from_secs(self.client.timeout_secs)
    }
}

fn override_from_env(target: &mut String, var: &str) {
    if let Ok(value) = std::env::var(var) {
        if !value.trim().is_empty() {
            *target = value.trim().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_deployment() {
        let settings = Settings::default();
        assert_eq!(settings.model.name, "llama3.2:latest");
        assert_eq!(settings.model.endpoint, "http://localhost:11434/api/generate");
        assert_eq!(settings.client.service_url, "http://localhost:8000/summarize/");
        assert_eq!(settings.server.bind, "127.0.0.1:8000");
        assert_eq!(
            settings.server.allowed_origins,
            vec!["http://localhost:8501", "http://localhost:3000"]
        );
    }

    #[test]
    fn timeouts_default_to_sixty_seconds() {
        let settings = Settings::default();
        assert_eq!(settings.model_timeout(), Duration::from_secs(60));
        assert_eq!(settings.client_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_keys() {
        let settings = Settings::from_toml_str(
            r#"
            [model]
            name = "mistral:7b"
            "#,
        )
        .unwrap();

        assert_eq!(settings.model.name, "mistral:7b");
        assert_eq!(settings.model.timeout_secs, 60);
        assert_eq!(settings.server.bind, "127.0.0.1:8000");
    }

    #[test]
    fn default_settings_round_trip_through_toml() {
        let content = toml::to_string_pretty(&Settings::default()).unwrap();
        let parsed = Settings::from_toml_str(&content).unwrap();
        assert_eq!(parsed.client.service_url, Settings::default().client.service_url);
    }

    #[test]
    fn invalid_toml_is_rejected() {
        assert!(Settings::from_toml_str("[model\nname = 1").is_err());
    }
}
