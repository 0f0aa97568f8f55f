//! SQLite query execution.

use crate::types::Result;
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};

/// Executes synthesized SQL against a local SQLite file.
///
/// A fresh connection is opened for every call and released before the call
/// returns, on the success and failure paths alike. No pooling, no
/// transaction spanning turns.
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    db_path: PathBuf,
}

impl QueryExecutor {
    /// Create an executor for a database file.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Database file path.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Execute SQL verbatim and fetch every row into memory.
    ///
    /// The SQL is run exactly as given; nothing here validates it against
    /// the schema or restricts what it may do.
    ///
    /// # Returns
    ///
    /// All result rows, each column mapped to JSON: NULL to null, INTEGER
    /// and REAL to numbers, TEXT to strings, BLOB to a lossy UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns `AssistantError::SqlError` for malformed SQL, unknown
    /// objects, or any other execution failure. The connection is dropped
    /// before the error propagates.
    pub fn execute(&self, sql: &str) -> Result<Vec<Vec<JsonValue>>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(sql)?;
        let column_count = stmt.column_count();

        let mut rows = stmt.query([])?;
        let mut data = Vec::new();

        while let Some(row) = rows.next()? {
            let mut record = Vec::with_capacity(column_count);
            for idx in 0..column_count {
                record.push(json_value(row.get_ref(idx)?));
            }
            data.push(record);
        }

        Ok(data)
    }
}

fn json_value(value: ValueRef<'_>) -> JsonValue {
    match value {
        ValueRef::Null => JsonValue::Null,
        ValueRef::Integer(i) => JsonValue::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        ValueRef::Text(t) => JsonValue::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => JsonValue::String(String::from_utf8_lossy(b).into_owned()),
    }
}
