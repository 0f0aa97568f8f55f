//! Generation provider abstraction.
//!
//! Both hosted backends implement the same prompt-in/text-out interface, so
//! the synthesizers never know which provider is configured. Tests
//! substitute their own implementations through the same trait.

use crate::llm::bedrock::BedrockClient;
use crate::llm::gemini::GeminiClient;
use crate::types::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Generation parameters forwarded to the backend.
///
/// Defaults match the managed backend's original generation config.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// Maximum output length in tokens
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f64,

    /// Nucleus sampling threshold
    pub top_p: f64,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            temperature: 0.1,
            top_p: 0.9,
        }
    }
}

/// Text generation backend.
///
/// # Errors
///
/// Implementations return `AssistantError::EmptyGeneration` when the backend
/// answered but produced no usable completion (safety filtering, empty
/// candidate list), and `AssistantError::LlmError` for transport or protocol
/// failures. Callers rely on that distinction for retry decisions.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Send a prompt and return the raw completion text.
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String>;
}

/// Construct the provider matching a model id.
///
/// Routing follows the model-name prefix: `gemini*` selects the direct
/// Gemini API, anything else the Bedrock runtime.
///
/// # Arguments
///
/// * `model` - Model id (e.g. "gemini-2.5-pro", "mistral.mixtral-8x7b-instruct-v0:1")
///
/// # Errors
///
/// Returns `AssistantError::ConfigError` if the selected backend's
/// credentials are absent from the environment.
pub async fn provider_from_env(model: &str) -> Result<Arc<dyn GenerationProvider>> {
    if model.starts_with("gemini") {
        Ok(Arc::new(GeminiClient::from_env(model.to_string())?))
    } else {
        Ok(Arc::new(BedrockClient::from_env(model.to_string()).await?))
    }
}
