//! Application context: configuration plus the components built from it.
//!
//! Everything the pipeline needs is constructed once at process start and
//! passed by reference, so there is no import-time global state and tests
//! can substitute the provider or point the executor at a scratch database.

use crate::llm::{provider_from_env, AnswerBuilder, GenerationProvider, SqlBuilder};
use crate::query::QueryExecutor;
use crate::schema::DataDictionary;
use crate::types::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database file
    pub database: PathBuf,

    /// Data dictionary JSON file
    pub dictionary: PathBuf,

    /// Model id; selects the backend by prefix
    pub model: String,
}

/// Long-lived application state shared by every turn.
pub struct AppContext {
    dictionary: DataDictionary,
    sql_builder: SqlBuilder,
    answer_builder: AnswerBuilder,
    executor: QueryExecutor,
}

impl AppContext {
    /// Load the dictionary, construct the provider, and wire the pipeline.
    ///
    /// # Errors
    ///
    /// Returns `AssistantError::SchemaError` if the dictionary is missing or
    /// unparsable and `AssistantError::ConfigError` if the selected
    /// backend's credentials are absent. Both are fatal at startup.
    pub async fn initialize(config: &AppConfig) -> Result<Self> {
        let dictionary = DataDictionary::load(&config.dictionary)?;
        let provider = provider_from_env(&config.model).await?;

        Ok(Self::with_provider(config, dictionary, provider))
    }

    /// Wire the pipeline around an explicit provider.
    ///
    /// Used by tests to substitute a scripted backend; `initialize` is the
    /// production path.
    pub fn with_provider(
        config: &AppConfig,
        dictionary: DataDictionary,
        provider: Arc<dyn GenerationProvider>,
    ) -> Self {
        Self {
            dictionary,
            sql_builder: SqlBuilder::new(provider.clone()),
            answer_builder: AnswerBuilder::new(provider),
            executor: QueryExecutor::new(&config.database),
        }
    }

    /// Loaded data dictionary.
    pub fn dictionary(&self) -> &DataDictionary {
        &self.dictionary
    }

    /// Query executor.
    pub fn executor(&self) -> &QueryExecutor {
        &self.executor
    }

    /// Answer one question end to end.
    ///
    /// Runs the three-stage pipeline: synthesize SQL from the question and
    /// dictionary, execute it, phrase the rows as an answer. Each stage's
    /// error propagates as-is; the caller decides whether it is fatal (it
    /// never is for the interactive loop).
    pub async fn ask(&self, question: &str) -> Result<String> {
        let sql = self.sql_builder.build_sql(question, &self.dictionary).await?;
        tracing::info!(sql = %sql, "executing synthesized query");

        let rows = self.executor.execute(&sql)?;
        tracing::debug!(row_count = rows.len(), "query returned");

        self.answer_builder.build_answer(question, &rows).await
    }
}
