//! Amazon Bedrock InvokeModel backend.

use crate::llm::provider::{GenerationOptions, GenerationProvider};
use crate::types::{AssistantError, Result};
use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client;
use serde::Deserialize;
use serde_json::json;

const DEFAULT_REGION: &str = "us-east-1";

/// InvokeModel response body.
#[derive(Debug, Deserialize)]
struct InvokeResponse {
    #[serde(default)]
    results: Vec<InvokeResult>,
}

#[derive(Debug, Deserialize)]
struct InvokeResult {
    #[serde(rename = "outputText")]
    output_text: Option<String>,
}

/// Managed-inference backend.
pub struct BedrockClient {
    client: Client,
    model: String,
}

impl BedrockClient {
    /// Create a new client from an already-loaded SDK client.
    pub fn new(client: Client, model: String) -> Self {
        Self { client, model }
    }

    /// Create from environment variables.
    ///
    /// Region comes from `AWS_REGION` (default `us-east-1`); credentials
    /// resolve through the SDK's default chain, but the access-key pair is
    /// checked up front so a misconfigured environment fails at startup
    /// rather than on the first question.
    ///
    /// # Errors
    ///
    /// Returns `AssistantError::ConfigError` if `AWS_ACCESS_KEY_ID` or
    /// `AWS_SECRET_ACCESS_KEY` is not set.
    pub async fn from_env(model: String) -> Result<Self> {
        if std::env::var("AWS_ACCESS_KEY_ID").is_err()
            || std::env::var("AWS_SECRET_ACCESS_KEY").is_err()
        {
            return Err(AssistantError::ConfigError(
                "AWS credentials not found (AWS_ACCESS_KEY_ID / AWS_SECRET_ACCESS_KEY)".to_string(),
            ));
        }

        let region = std::env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string());

        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region))
            .load()
            .await;

        Ok(Self::new(Client::new(&config), model))
    }
}

#[async_trait]
impl GenerationProvider for BedrockClient {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String> {
        let body = json!({
            "inputText": prompt,
            "textGenerationConfig": {
                "maxTokenCount": options.max_tokens,
                "temperature": options.temperature,
                "topP": options.top_p
            }
        });

        let response = self
            .client
            .invoke_model()
            .model_id(&self.model)
            .content_type("application/json")
            .body(Blob::new(body.to_string()))
            .send()
            .await
            .map_err(|e| AssistantError::LlmError(format!("Bedrock invoke failed: {}", e)))?;

        let parsed: InvokeResponse = serde_json::from_slice(response.body().as_ref())
            .map_err(|e| AssistantError::LlmError(format!("Failed to parse Bedrock response: {}", e)))?;

        let text = parsed
            .results
            .first()
            .and_then(|r| r.output_text.as_deref())
            .map(str::trim)
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AssistantError::EmptyGeneration(
                "Bedrock returned no output text".to_string(),
            ));
        }

        Ok(text.to_string())
    }
}
