//! Instruction text-generation style hosted backend
//!
//! Speaks the Hugging Face Inference API shape: the built prompt is
//! wrapped in instruction markers and posted to the model route; the
//! generated text comes back as the first element of a JSON array.

use async_trait::async_trait;
use remit_domain::traits::ModelClient;
use remit_domain::ModelError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default inference API base URL
pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co";

/// Default model route when none is configured
pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.3";

/// Default cap on newly generated tokens
pub const DEFAULT_MAX_NEW_TOKENS: u32 = 512;

/// Transport-level timeout (seconds)
const TIMEOUT_SECS: u64 = 30;

/// Instruction text-generation backend client.
pub struct TextGenerationClient {
    endpoint: String,
    model: String,
    api_key: String,
    max_new_tokens: u32,
    temperature: f32,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct TextGenRequest {
    inputs: String,
    parameters: TextGenParameters,
}

#[derive(Serialize)]
struct TextGenParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Deserialize)]
struct TextGenResponse {
    generated_text: String,
}

impl TextGenerationClient {
    /// Create a client against the given inference API base URL.
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
            max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
            // Instruction backends reject a hard 0.0; keep it near-greedy.
            temperature: 0.1,
            client,
        }
    }

    /// Create a client from process configuration.
    ///
    /// Reads the bearer credential from `HF_API_TOKEN`; a missing variable
    /// yields a client that reports `Unconfigured` on use.
    pub fn from_env(model: impl Into<String>) -> Self {
        let api_key = std::env::var("HF_API_TOKEN").unwrap_or_default();
        Self::new(DEFAULT_ENDPOINT, model, api_key)
    }

    /// Override the new-token cap.
    pub fn with_max_new_tokens(mut self, max_new_tokens: u32) -> Self {
        self.max_new_tokens = max_new_tokens;
        self
    }

    /// Override the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    fn request_body(&self, prompt: &str) -> TextGenRequest {
        TextGenRequest {
            inputs: format!("[INST] {} [/INST]", prompt),
            parameters: TextGenParameters {
                max_new_tokens: self.max_new_tokens,
                temperature: self.temperature,
                return_full_text: false,
            },
        }
    }
}

#[async_trait]
impl ModelClient for TextGenerationClient {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        if self.api_key.is_empty() {
            return Err(ModelError::Unconfigured);
        }

        let url = format!("{}/models/{}", self.endpoint, self.model);
        debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            "Sending text-generation request"
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

        let parsed: Vec<TextGenResponse> = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

        let text = parsed
            .into_iter()
            .next()
            .map(|item| item.generated_text)
            .ok_or_else(|| {
                ModelError::InvalidResponse("response array was empty".to_string())
            })?;

        debug!(response_len = text.len(), "Received text-generation response");
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
