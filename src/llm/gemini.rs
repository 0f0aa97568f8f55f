//! Gemini generateContent API client.

use crate::llm::provider::{GenerationOptions, GenerationProvider};
use crate::types::{AssistantError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Harm categories relaxed to BLOCK_NONE.
///
/// Reporting vocabulary ("largest loan", "defaulted customers") trips the
/// default thresholds on an otherwise harmless dataset, so every category is
/// turned off for this synthetic-data workload.
const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Gemini API response.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Direct generative-model backend.
pub struct GeminiClient {
    api_key: String,
    model: String,
    client: Client,
}

impl GeminiClient {
    /// Create a new client.
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: Client::new(),
        }
    }

    /// Create from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `AssistantError::ConfigError` if `GEMINI_API_KEY` is not set.
    pub fn from_env(model: String) -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            AssistantError::ConfigError("GEMINI_API_KEY environment variable not set".to_string())
        })?;

        Ok(Self::new(api_key, model))
    }

    fn safety_settings() -> serde_json::Value {
        json!(SAFETY_CATEGORIES
            .iter()
            .map(|category| json!({"category": category, "threshold": "BLOCK_NONE"}))
            .collect::<Vec<_>>())
    }
}

#[async_trait]
impl GenerationProvider for GeminiClient {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String> {
        let url = format!("{}/{}:generateContent", API_BASE, self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&json!({
                "contents": [
                    {"parts": [{"text": prompt}]}
                ],
                "safetySettings": Self::safety_settings(),
                "generationConfig": {
                    "maxOutputTokens": options.max_tokens,
                    "temperature": options.temperature,
                    "topP": options.top_p
                }
            }))
            .send()
            .await
            .map_err(|e| AssistantError::LlmError(format!("Gemini API request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AssistantError::LlmError(format!("Failed to read Gemini response: {}", e)))?;

        if !status.is_success() {
            return Err(AssistantError::LlmError(format!(
                "Gemini API error {}: {}",
                status, body
            )));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            AssistantError::LlmError(format!("Failed to parse Gemini response: {}", e))
        })?;

        // A 200 with no candidates or no content parts means the generation
        // was filtered, not that the request failed.
        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.as_deref());

        match text {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(AssistantError::EmptyGeneration(
                "Gemini returned no usable candidates".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safety_settings_cover_all_categories() {
        let settings = GeminiClient::safety_settings();
        let entries = settings.as_array().unwrap();

        assert_eq!(entries.len(), 4);
        for entry in entries {
            assert_eq!(entry["threshold"], "BLOCK_NONE");
        }
    }

    #[test]
    fn test_empty_candidates_parse() {
        // Safety-filtered responses come back as 200 with an empty or
        // absent candidate list.
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());

        let parsed: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": []}}]}"#).unwrap();
        assert!(parsed.candidates[0]
            .content
            .as_ref()
            .unwrap()
            .parts
            .is_empty());
    }
}
