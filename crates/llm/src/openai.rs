//! OpenAI chat completions provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pipeline::{ChatError, ChatMessage, ChatProvider, ChatReply, ChatRequest};

/// Public OpenAI API root.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Model used when the deployment does not name one.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Connection settings for an OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct OpenAiConfig {
    /// Bearer token.
    pub api_key: String,
    /// API root; `/chat/completions` is appended.
    pub base_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl OpenAiConfig {
    /// Settings for the public API with the default model and no timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: OPENAI_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
        }
    }

    /// Points the provider at another OpenAI-compatible API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets or clears the whole-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

// Keeps the key out of logs.
impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Errors raised while constructing a provider.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// The API key is empty or whitespace.
    #[error("API key is empty")]
    MissingApiKey,

    /// The HTTP client could not be built (e.g. TLS backend initialisation).
    #[error("HTTP client could not be built: {0}")]
    Client(#[from] reqwest::Error),
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: [ChatMessage; 2],
    temperature: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// [`ChatProvider`] backed by an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    config: OpenAiConfig,
    endpoint: String,
}

impl OpenAiProvider {
    /// Builds the provider and its HTTP client.
    pub fn new(config: OpenAiConfig) -> Result<Self, ProviderBuildError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderBuildError::MissingApiKey);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let endpoint = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    /// The URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, ChatError> {
        let body = CompletionBody {
            model: &self.config.model,
            messages: request.messages(),
            temperature: request.temperature,
        };

        tracing::debug!(model = %self.config.model, endpoint = %self.endpoint, "Sending completion request");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| ChatError::Transport {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorEnvelope>(&bytes)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("unrecognised status")
                        .to_string()
                });
            return Err(ChatError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: CompletionResponse =
            serde_json::from_slice(&bytes).map_err(|e| ChatError::MalformedResponse {
                message: e.to_string(),
            })?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(ChatError::EmptyReply)?;

        tracing::debug!(model = %self.config.model, reply_len = text.len(), "Completion received");
        Ok(ChatReply::new(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url_without_double_slash() {
        let provider =
            OpenAiProvider::new(OpenAiConfig::new("k").with_base_url("http://localhost:9/v1/"))
                .unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:9/v1/chat/completions");
    }

    #[test]
    fn blank_api_key_is_rejected() {
        let err = OpenAiProvider::new(OpenAiConfig::new("  ")).unwrap_err();
        assert!(matches!(err, ProviderBuildError::MissingApiKey));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let rendered = format!("{:?}", OpenAiConfig::new("sk-secret"));
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("gpt-3.5-turbo"));
    }

    #[test]
    fn name_is_the_model() {
        let provider = OpenAiProvider::new(OpenAiConfig::new("k").with_model("gpt-4")).unwrap();
        assert_eq!(provider.name(), "gpt-4");
    }
}
