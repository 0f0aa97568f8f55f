//! Error types for assistant operations.
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `From`
//! implementations.

use thiserror::Error;

/// Error type covering every stage of the question-answering pipeline.
///
/// Startup failures (`ConfigError`, `SchemaError`) abort the process before
/// the interactive loop starts; everything else is caught per turn.
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Missing credentials or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Data dictionary missing or unparsable
    #[error("Data dictionary error: {0}")]
    SchemaError(String),

    /// LLM backend transport or protocol failure
    #[error("LLM error: {0}")]
    LlmError(String),

    /// The backend answered but produced no usable completion.
    ///
    /// Distinct from `LlmError` so the SQL synthesizer can retry once on a
    /// safety-blocked generation without retrying transport failures.
    #[error("Empty generation: {0}")]
    EmptyGeneration(String),

    /// SQL execution failed
    #[error("SQL error: {0}")]
    SqlError(#[from] rusqlite::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl AssistantError {
    /// Check whether this is a blocked/empty generation.
    ///
    /// # Returns
    ///
    /// `true` only for `EmptyGeneration`; transport errors return `false`
    pub fn is_empty_generation(&self) -> bool {
        matches!(self, Self::EmptyGeneration(_))
    }
}
