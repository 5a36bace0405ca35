//! Configuration for the extraction pipeline

use serde::{Deserialize, Serialize};

/// Which hosted backend shape the pipeline talks to.
///
/// Both shapes take the built prompt and return raw text; they are
/// interchangeable behind the model client interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackendKind {
    /// Chat-completion style API (single user message, temperature 0)
    ChatCompletion,
    /// Instruction text-generation style API
    TextGeneration,
}

impl Default for BackendKind {
    fn default() -> Self {
        BackendKind::ChatCompletion
    }
}

/// Configuration for the extraction pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Backend shape to use
    pub backend: BackendKind,

    /// Model identifier at the backend
    pub model: String,

    /// Completion token limit for the model call
    pub max_tokens: u32,

    /// Sampling temperature (only the text-generation backend honors a
    /// non-zero value; chat-completion requests always pin 0)
    pub temperature: f32,

    /// Leading document pages decoded into text
    pub max_pages: usize,
}

impl PipelineConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.model.is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if self.max_pages == 0 {
            return Err("max_pages must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature {} out of range [0.0, 2.0]",
                self.temperature
            ));
        }
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::ChatCompletion,
            model: "gpt-4o-mini".to_string(),
            max_tokens: 512,
            temperature: 0.0,
            max_pages: 3,
        }
    }
}
