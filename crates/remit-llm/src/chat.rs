//! Chat-completion style hosted backend
//!
//! Speaks the OpenAI-compatible `/chat/completions` shape: the built
//! prompt goes out as a single user message with temperature 0 for
//! determinism, and the first choice's message content comes back as the
//! raw generated text.

use async_trait::async_trait;
use remit_domain::traits::ModelClient;
use remit_domain::ModelError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default chat-completion API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default model when none is configured
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default completion token limit
pub const DEFAULT_MAX_TOKENS: u32 = 512;

/// Transport-level timeout (seconds)
const TIMEOUT_SECS: u64 = 30;

/// Chat-completion backend client.
///
/// An empty API key is a configuration error: `generate` reports
/// [`ModelError::Unconfigured`] without attempting a request.
pub struct ChatCompletionClient {
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl ChatCompletionClient {
    /// Create a client against the given API base URL.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .unwrap();

        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            client,
        }
    }

    /// Create a client from process configuration.
    ///
    /// Reads the bearer credential from `OPENAI_API_KEY`; a missing
    /// variable yields a client that reports `Unconfigured` on use.
    pub fn from_env(model: impl Into<String>) -> Self {
        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        Self::new(DEFAULT_ENDPOINT, model, api_key)
    }

    /// Override the completion token limit.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn request_body(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: self.max_tokens,
            // Temperature 0 keeps field extraction as deterministic as the
            // backend allows.
            temperature: 0.0,
        }
    }
}

#[async_trait]
impl ModelClient for ChatCompletionClient {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        if self.api_key.is_empty() {
            return Err(ModelError::Unconfigured);
        }

        let url = format!("{}/chat/completions", self.endpoint);
        debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            "Sending chat-completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(ModelError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ModelError::InvalidResponse("response had no choices".to_string()))?;

        debug!(response_len = text.len(), "Received chat-completion response");
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
