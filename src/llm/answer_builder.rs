//! Natural-language answer synthesis from query results.

use crate::llm::provider::{GenerationOptions, GenerationProvider};
use crate::types::{AssistantError, Result};
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// LLM-powered answer synthesizer.
pub struct AnswerBuilder {
    provider: Arc<dyn GenerationProvider>,
    options: GenerationOptions,
}

impl AnswerBuilder {
    /// Create a new builder over a generation provider.
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self {
            provider,
            options: GenerationOptions::default(),
        }
    }

    /// Phrase a query result as a natural-language answer.
    ///
    /// # Arguments
    ///
    /// * `question` - Original user question
    /// * `rows` - Rows fetched by the executor
    ///
    /// # Errors
    ///
    /// Returns `AssistantError::EmptyGeneration` ("no answer produced") if
    /// the backend yields no usable completion. Unlike SQL synthesis, there
    /// is no retry here.
    pub async fn build_answer(&self, question: &str, rows: &[Vec<JsonValue>]) -> Result<String> {
        let prompt = Self::build_prompt(question, rows);
        tracing::debug!(prompt = %prompt, "answer synthesis prompt");

        self.provider
            .generate(&prompt, &self.options)
            .await
            .map_err(|e| match e {
                AssistantError::EmptyGeneration(_) => {
                    AssistantError::EmptyGeneration("no answer produced".to_string())
                }
                other => other,
            })
    }

    /// Serialize a query result for prompt embedding.
    ///
    /// A single-row, single-column result renders as the bare scalar so the
    /// model sees `42` rather than `[[42]]` for counts and sums; anything
    /// else is serialized as a JSON array of rows.
    pub fn serialize_result(rows: &[Vec<JsonValue>]) -> String {
        if rows.len() == 1 && rows[0].len() == 1 {
            return match &rows[0][0] {
                JsonValue::String(s) => s.clone(),
                other => other.to_string(),
            };
        }

        serde_json::to_string(rows).unwrap_or_else(|_| "[]".to_string())
    }

    /// Render the answer synthesis prompt.
    fn build_prompt(question: &str, rows: &[Vec<JsonValue>]) -> String {
        format!(
            r#"You are a helpful banking assistant working with a *synthetic demo dataset*.
This is fictional and safe to share.

The user asked: "{question}"
The database query returned: {result}

Please give a clear, concise, and helpful answer in natural language."#,
            question = question,
            result = Self::serialize_result(rows)
        )
    }
}
