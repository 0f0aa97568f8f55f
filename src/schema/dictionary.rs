//! Data dictionary describing the queryable database.
//!
//! The dictionary is a JSON document mapping table names to column
//! descriptors (name, type, description). It is loaded once at startup,
//! held immutably for the process lifetime, and embedded into every SQL
//! synthesis prompt so the model grounds its queries in real tables.

use crate::types::{AssistantError, Result};
use serde_json::Value as JsonValue;
use std::path::Path;

/// Immutable schema description loaded from a JSON file.
///
/// The document is kept as raw JSON rather than a typed model: the only
/// consumer is the prompt template, which embeds it verbatim. Dictionary
/// changes require a restart.
#[derive(Debug, Clone)]
pub struct DataDictionary {
    document: JsonValue,
}

impl DataDictionary {
    /// Load the dictionary from a JSON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Dictionary file path
    ///
    /// # Errors
    ///
    /// Returns `AssistantError::SchemaError` if the file is missing, is not
    /// valid JSON, or its top level is not an object. Callers treat this as
    /// fatal at startup.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let raw = std::fs::read_to_string(path).map_err(|e| {
            AssistantError::SchemaError(format!("{} not found or unreadable: {}", path.display(), e))
        })?;

        let document: JsonValue = serde_json::from_str(&raw).map_err(|e| {
            AssistantError::SchemaError(format!("{} is not valid JSON: {}", path.display(), e))
        })?;

        Self::from_value(document)
    }

    /// Build a dictionary from an already-parsed JSON document.
    ///
    /// # Errors
    ///
    /// Returns `AssistantError::SchemaError` if the top level is not an
    /// object (a mapping of table name to table description).
    pub fn from_value(document: JsonValue) -> Result<Self> {
        if !document.is_object() {
            return Err(AssistantError::SchemaError(
                "dictionary top level must be a JSON object keyed by table name".to_string(),
            ));
        }

        Ok(Self { document })
    }

    /// Serialize the dictionary for prompt embedding.
    ///
    /// Pretty-printed so the model sees the same indented layout a human
    /// maintaining the dictionary file would.
    pub fn to_prompt_json(&self) -> String {
        serde_json::to_string_pretty(&self.document)
            .unwrap_or_else(|_| self.document.to_string())
    }

    /// Table names at the top level of the dictionary.
    pub fn table_names(&self) -> Vec<&str> {
        match self.document.as_object() {
            Some(map) => map.keys().map(String::as_str).collect(),
            None => Vec::new(),
        }
    }

    /// Raw JSON document.
    pub fn as_value(&self) -> &JsonValue {
        &self.document
    }
}
