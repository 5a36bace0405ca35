//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and its two
//! external collaborators. Infrastructure implementations live in other
//! crates.

use crate::error::{ExtractError, ModelError};
use async_trait::async_trait;

/// Trait for turning document bytes into plain text
///
/// Implemented by the infrastructure layer (remit-pdf)
#[async_trait]
pub trait DocumentTextExtractor: Send + Sync {
    /// Decode up to the leading pages of the document into plain text.
    ///
    /// An empty string is a legal success (a blank or image-only
    /// document); credential problems are reported through the two
    /// password variants of [`ExtractError`].
    async fn extract_text(
        &self,
        bytes: &[u8],
        credential: Option<&str>,
    ) -> Result<String, ExtractError>;
}

/// Trait for hosted language-model backends
///
/// Implemented by the infrastructure layer (remit-llm). Chat-completion
/// and instruction text-generation backends are interchangeable behind
/// this interface: both take the built prompt and return raw generated
/// text.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send the prompt and return the raw generated text.
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: ModelClient + ?Sized> ModelClient for Box<T> {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        (**self).generate(prompt).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
