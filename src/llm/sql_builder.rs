//! Natural language to SQL synthesis.

use crate::llm::extract::extract_sql_payload;
use crate::llm::provider::{GenerationOptions, GenerationProvider};
use crate::schema::DataDictionary;
use crate::types::{AssistantError, Result};
use std::sync::Arc;

/// Substring swap applied on the single retry.
///
/// "largest loan" phrasing is a known safety false-positive on the hosted
/// backends; rewording it unblocks the generation. This is the only retry
/// the synthesizer performs.
const RETRY_PATTERN: &str = "largest loan";
const RETRY_REPLACEMENT: &str = "highest loan amount";

/// LLM-powered SQL synthesizer.
pub struct SqlBuilder {
    provider: Arc<dyn GenerationProvider>,
    options: GenerationOptions,
}

impl SqlBuilder {
    /// Create a new builder over a generation provider.
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self {
            provider,
            options: GenerationOptions::default(),
        }
    }

    /// Convert a natural-language question into a SQL string.
    ///
    /// # Arguments
    ///
    /// * `question` - Verbatim user question
    /// * `dictionary` - Schema context embedded into the prompt
    ///
    /// # Returns
    ///
    /// The extracted SQL text. No validation against the schema or SQL
    /// grammar happens here; the caller receives whatever the model
    /// produced after fence stripping and JSON extraction.
    ///
    /// # Errors
    ///
    /// Returns `AssistantError::EmptyGeneration` if the backend produces no
    /// usable completion after the single retry; transport errors propagate
    /// unretried.
    pub async fn build_sql(&self, question: &str, dictionary: &DataDictionary) -> Result<String> {
        let prompt = Self::build_prompt(question, dictionary);
        tracing::debug!(prompt = %prompt, "SQL synthesis prompt");

        let raw = match self.provider.generate(&prompt, &self.options).await {
            Ok(raw) => raw,
            Err(e) if e.is_empty_generation() => {
                tracing::warn!("SQL generation blocked, retrying with reworded prompt");
                let retry_prompt = prompt.replace(RETRY_PATTERN, RETRY_REPLACEMENT);
                self.provider
                    .generate(&retry_prompt, &self.options)
                    .await
                    .map_err(|e| match e {
                        AssistantError::EmptyGeneration(_) => AssistantError::EmptyGeneration(
                            "no SQL produced after retry".to_string(),
                        ),
                        other => other,
                    })?
            }
            Err(e) => return Err(e),
        };

        let sql = extract_sql_payload(&raw);
        tracing::debug!(sql = %sql, "SQL query generated");

        Ok(sql)
    }

    /// Render the SQL synthesis prompt.
    fn build_prompt(question: &str, dictionary: &DataDictionary) -> String {
        format!(
            r#"You are a SQL generation engine for a reporting tool.

Task: Convert the following request into a valid **SQLite** SQL query.
The database schema is provided below in JSON format.
Use this schema to ensure correct joins, column usage, and filtering.
Do not invent tables or columns that are not in the schema.

Database Schema (JSON):
{schema}

Output format must be ONLY JSON:
{{
  "sql": "<SQL query here>"
}}

User request: {question}"#,
            schema = dictionary.to_prompt_json(),
            question = question
        )
    }
}
