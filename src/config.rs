//! Runtime configuration: environment variables first, optional TOML file.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {0}")]
    MissingEnv(String),
    #[error("Invalid API URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for the completion and embedding services plus retrieval bounds.
///
/// `api_url` is the base of an OpenAI-compatible API; the clients append
/// `/chat/completions` and `/embeddings` to it.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    #[serde(default = "default_vision_model")]
    pub vision_model: String,
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_retrieval_limit")]
    pub retrieval_limit: usize,
}

fn default_api_url() -> String {
    "https://api.together.xyz/v1".to_string()
}

fn default_chat_model() -> String {
    "meta-llama/Llama-Vision-Free".to_string()
}

fn default_vision_model() -> String {
    "meta-llama/Llama-Vision-Free".to_string()
}

fn default_embedding_model() -> String {
    "BAAI/bge-large-en-v1.5".to_string()
}

fn default_max_tokens() -> u32 {
    512
}

fn default_temperature() -> f32 {
    0.7
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_retrieval_limit() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: String::new(),
            chat_model: default_chat_model(),
            vision_model: default_vision_model(),
            embedding_model: default_embedding_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            request_timeout_secs: default_request_timeout_secs(),
            retrieval_limit: default_retrieval_limit(),
        }
    }
}

impl Config {
    /// Build from environment variables. `API_KEY` is required; everything
    /// else falls back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("API_URL") {
            config.api_url = url;
        }
        if let Ok(model) = std::env::var("CHAT_MODEL") {
            config.chat_model = model;
        }
        if let Ok(model) = std::env::var("VISION_MODEL") {
            config.vision_model = model;
        }
        if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
            config.embedding_model = model;
        }
        if let Ok(limit) = std::env::var("RETRIEVAL_LIMIT") {
            if let Ok(limit) = limit.parse() {
                config.retrieval_limit = limit;
            }
        }
        if let Ok(secs) = std::env::var("REQUEST_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.request_timeout_secs = secs;
            }
        }

        config.api_key = std::env::var("API_KEY")
            .map_err(|_| ConfigError::MissingEnv("API_KEY".to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file. Missing fields take their defaults; the
    /// API key may still come from the environment.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&raw)?;
        if config.api_key.is_empty() {
            config.api_key = std::env::var("API_KEY")
                .map_err(|_| ConfigError::MissingEnv("API_KEY".to_string()))?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.api_url).map_err(|source| ConfigError::InvalidUrl {
            url: self.api_url.clone(),
            source,
        })?;
        if self.api_key.is_empty() {
            return Err(ConfigError::MissingEnv("API_KEY".to_string()));
        }
        Ok(())
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_url.trim_end_matches('/'))
    }

    pub fn embeddings_url(&self) -> String {
        format!("{}/embeddings", self.api_url.trim_end_matches('/'))
    }
}
