//! HTTP client for the hosted completion service.

use crate::config::Config;
use crate::llm::schema::{ChatMessage, CompletionRequest, CompletionResponse};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 1000;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
    #[error("Request timeout - the API took too long to respond")]
    Timeout,
    #[error("Connection error - unable to reach the API")]
    Connect,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Authentication failed - check your API key")]
    Unauthorized,
    #[error("Access forbidden - insufficient permissions")]
    Forbidden,
    #[error("Rate limit exceeded - too many requests")]
    RateLimited,
    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Failed to parse API response as JSON: {0}")]
    Decode(String),
    #[error("API returned an empty response")]
    Empty,
}

/// One client per process, shared by the captioner and the conversation
/// engine. Every request carries the configured timeout, so a hung call
/// surfaces as `Timeout` instead of blocking the session.
pub struct CompletionClient {
    http: Client,
    completions_url: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
}

impl CompletionClient {
    pub fn new(config: &Config) -> Result<Self, CompletionError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| CompletionError::Client(e.to_string()))?;

        Ok(Self {
            http,
            completions_url: config.completions_url(),
            api_key: config.api_key.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    /// Request a completion, retrying transient failures with backoff.
    #[instrument(skip(self, messages), fields(count = messages.len()))]
    pub async fn complete(
        &self,
        model: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<String, CompletionError> {
        let request = CompletionRequest {
            model: model.to_string(),
            messages,
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
        };

        let mut last_error = CompletionError::Empty;
        for attempt in 1..=MAX_RETRIES {
            match self.complete_once(&request).await {
                Ok(content) => {
                    debug!(attempt, chars = content.len(), "completion succeeded");
                    return Ok(content);
                }
                Err(e) => {
                    warn!(attempt, error = %e, "completion attempt failed");
                    last_error = e;
                    if attempt < MAX_RETRIES {
                        tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS * attempt as u64))
                            .await;
                    }
                }
            }
        }
        Err(last_error)
    }

    async fn complete_once(
        &self,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        let response = self
            .http
            .post(&self.completions_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout
                } else if e.is_connect() {
                    CompletionError::Connect
                } else {
                    CompletionError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(match status.as_u16() {
                401 => CompletionError::Unauthorized,
                403 => CompletionError::Forbidden,
                429 => CompletionError::RateLimited,
                500..=599 => CompletionError::Server {
                    status: status.as_u16(),
                    body,
                },
                _ => CompletionError::Http {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Decode(e.to_string()))?;

        let content = completion
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or(CompletionError::Empty)?;
        if content.trim().is_empty() {
            return Err(CompletionError::Empty);
        }

        Ok(content)
    }
}
