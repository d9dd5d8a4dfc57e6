//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bearer token for the Fireflies GraphQL API.
pub const FIREFLIES_API_KEY_ENV: &str = "FIREFLIES_API_KEY";

/// API key for the chat-completion endpoint.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

const FIREFLIES_ENDPOINT_ENV: &str = "PRDGEN_FIREFLIES_ENDPOINT";
const LLM_ENDPOINT_ENV: &str = "PRDGEN_LLM_ENDPOINT";

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Transcription service settings
    #[serde(default)]
    pub transcripts: TranscriptSettings,

    /// Language model settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// MCP server settings
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSettings {
    /// Fireflies API key
    #[serde(default)]
    pub api_key: String,

    /// GraphQL endpoint
    #[serde(default = "default_fireflies_endpoint")]
    pub endpoint: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (openai)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key
    #[serde(default)]
    pub api_key: String,

    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API base URL (for OpenAI-compatible gateways)
    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Name reported to MCP clients
    #[serde(default = "default_server_name")]
    pub name: String,
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_fireflies_endpoint() -> String {
    "https://api.fireflies.ai/graphql".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_llm_provider() -> String {
    "openai".to_string()
}

pub(crate) fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

pub(crate) fn default_llm_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_server_name() -> String {
    "PRDGenerator".to_string()
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_fireflies_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            model: default_llm_model(),
            endpoint: default_llm_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            name: default_server_name(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let mut settings = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Parse settings from TOML text without touching the environment.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// API keys only fill blanks; endpoint overrides always win.
    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if self.transcripts.api_key.trim().is_empty() {
            if let Some(key) = non_blank(FIREFLIES_API_KEY_ENV) {
                self.transcripts.api_key = key;
            }
        }

        if self.llm.api_key.trim().is_empty() {
            if let Some(key) = non_blank(OPENAI_API_KEY_ENV) {
                self.llm.api_key = key;
            }
        }

        if let Some(endpoint) = non_blank(FIREFLIES_ENDPOINT_ENV) {
            self.transcripts.endpoint = endpoint;
        }

        if let Some(endpoint) = non_blank(LLM_ENDPOINT_ENV) {
            self.llm.endpoint = endpoint;
        }
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", crate::APP_NAME, crate::APP_NAME)
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &Path) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}
