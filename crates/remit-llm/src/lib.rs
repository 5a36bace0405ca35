//! Remit Model Client Layer
//!
//! Pluggable [`ModelClient`] implementations for the extraction pipeline.
//!
//! # Clients
//!
//! - [`MockClient`]: deterministic mock for testing
//! - [`ChatCompletionClient`]: chat-completion style hosted backend
//! - [`TextGenerationClient`]: instruction text-generation style hosted
//!   backend
//!
//! The two hosted shapes are interchangeable: both take the built prompt
//! and return raw generated text, and the pipeline never needs to know
//! which one answered.
//!
//! # Examples
//!
//! ```
//! use remit_llm::MockClient;
//! use remit_domain::traits::ModelClient;
//!
//! # async fn example() {
//! let client = MockClient::new(r#"{"issuer": "Chase"}"#);
//! let text = client.generate("any prompt").await.unwrap();
//! assert!(text.contains("Chase"));
//! # }
//! ```
//!
//! [`ModelClient`]: remit_domain::traits::ModelClient

#![warn(missing_docs)]

pub mod chat;
pub mod textgen;

use async_trait::async_trait;
use remit_domain::traits::ModelClient;
use remit_domain::ModelError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

pub use chat::ChatCompletionClient;
pub use textgen::TextGenerationClient;

/// Mock model client for deterministic testing
///
/// Returns pre-configured responses without any network calls.
///
/// # Examples
///
/// ```
/// use remit_llm::MockClient;
/// use remit_domain::traits::ModelClient;
///
/// # async fn example() {
/// // Fixed response for every prompt
/// let client = MockClient::new("Fixed response");
/// assert_eq!(client.generate("any prompt").await.unwrap(), "Fixed response");
///
/// // Per-prompt responses
/// let mut client = MockClient::default();
/// client.add_response("prompt1", "response1");
/// assert_eq!(client.generate("prompt1").await.unwrap(), "response1");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MockClient {
    default_response: String,
    fail_all: Option<ModelError>,
    responses: Arc<Mutex<HashMap<String, String>>>,
    errors: Arc<Mutex<HashMap<String, ModelError>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockClient {
    /// Create a MockClient with a fixed response for all prompts.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            fail_all: None,
            responses: Arc::new(Mutex::new(HashMap::new())),
            errors: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// A mock that fails every call with the given error.
    pub fn failing(error: ModelError) -> Self {
        let mut client = Self::new("");
        client.fail_all = Some(error);
        client
    }

    /// Add a specific response for a given prompt.
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(prompt.into(), response.into());
    }

    /// Configure a specific prompt to fail with the given error.
    pub fn add_error(&mut self, prompt: impl Into<String>, error: ModelError) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(prompt.into(), error);
    }

    /// Number of times `generate` was called.
    pub fn call_count(&self) -> usize {
        *self
            .call_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new("Not Found")
    }
}

#[async_trait]
impl ModelClient for MockClient {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        *self
            .call_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;

        if let Some(error) = &self.fail_all {
            return Err(error.clone());
        }

        let errors = self.errors.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(error) = errors.get(prompt) {
            return Err(error.clone());
        }
        drop(errors);

        let responses = self.responses.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(response) = responses.get(prompt) {
            return Ok(response.clone());
        }

        Ok(self.default_response.clone())
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_default_response() {
        let client = MockClient::new("Test response");
        assert_eq!(client.generate("any prompt").await.unwrap(), "Test response");
    }

    #[tokio::test]
    async fn test_mock_specific_responses() {
        let mut client = MockClient::default();
        client.add_response("hello", "world");
        client.add_response("foo", "bar");

        assert_eq!(client.generate("hello").await.unwrap(), "world");
        assert_eq!(client.generate("foo").await.unwrap(), "bar");
        assert_eq!(client.generate("unknown").await.unwrap(), "Not Found");
    }

    #[tokio::test]
    async fn test_mock_call_count() {
        let client = MockClient::new("test");
        assert_eq!(client.call_count(), 0);

        client.generate("prompt1").await.unwrap();
        client.generate("prompt2").await.unwrap();
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn test_mock_error_injection() {
        let mut client = MockClient::new("ok");
        client.add_error("bad prompt", ModelError::Unconfigured);

        assert!(matches!(
            client.generate("bad prompt").await,
            Err(ModelError::Unconfigured)
        ));
        assert_eq!(client.generate("good prompt").await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_mock_failing_fails_every_prompt() {
        let client = MockClient::failing(ModelError::Transport("offline".to_string()));
        assert!(client.generate("anything").await.is_err());
        assert!(client.generate("anything else").await.is_err());
    }

    #[tokio::test]
    async fn test_mock_clone_shares_call_count() {
        let client1 = MockClient::new("test");
        let client2 = client1.clone();

        client1.generate("test").await.unwrap();

        assert_eq!(client1.call_count(), 1);
        assert_eq!(client2.call_count(), 1);
    }
}
