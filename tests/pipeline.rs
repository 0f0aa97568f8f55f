//! End-to-end pipeline tests with a scripted provider and a scratch SQLite
//! database.

use askdb::llm::{GenerationOptions, GenerationProvider};
use askdb::schema::DataDictionary;
use askdb::types::{AssistantError, Result};
use askdb::{AppConfig, AppContext};
use async_trait::async_trait;
use rusqlite::Connection;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

/// Routes on the prompt template: SQL-synthesis prompts get a canned query,
/// answer-synthesis prompts get a canned sentence.
struct RoutingProvider {
    sql_response: Result<String>,
    prompts: Mutex<Vec<String>>,
}

impl RoutingProvider {
    fn new(sql_response: Result<String>) -> Self {
        Self {
            sql_response,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl GenerationProvider for RoutingProvider {
    async fn generate(&self, prompt: &str, _options: &GenerationOptions) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        if prompt.contains("SQL generation engine") {
            match &self.sql_response {
                Ok(s) => Ok(s.clone()),
                Err(AssistantError::EmptyGeneration(m)) => {
                    Err(AssistantError::EmptyGeneration(m.clone()))
                }
                Err(_) => Err(AssistantError::LlmError("scripted".to_string())),
            }
        } else {
            Ok("The portfolio holds 3 loans.".to_string())
        }
    }
}

fn seeded_database(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("bank.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE loans (loan_id INTEGER PRIMARY KEY, customer TEXT, amount REAL);
         INSERT INTO loans VALUES (1, 'Alice', 1200.5);
         INSERT INTO loans VALUES (2, 'Bob', 900.0);
         INSERT INTO loans VALUES (3, 'Cara', 450.25);",
    )
    .unwrap();
    path
}

fn dictionary() -> DataDictionary {
    DataDictionary::from_value(json!({
        "loans": {
            "description": "Loan accounts",
            "columns": [
                {"name": "loan_id", "type": "INTEGER", "description": "Primary key"},
                {"name": "customer", "type": "TEXT", "description": "Borrower name"},
                {"name": "amount", "type": "REAL", "description": "Principal amount"}
            ]
        }
    }))
    .unwrap()
}

fn context(dir: &tempfile::TempDir, provider: Arc<dyn GenerationProvider>) -> AppContext {
    let config = AppConfig {
        database: seeded_database(dir),
        dictionary: dir.path().join("unused.json"),
        model: "scripted".to_string(),
    };
    AppContext::with_provider(&config, dictionary(), provider)
}

#[tokio::test]
async fn test_full_turn_produces_answer() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(RoutingProvider::new(Ok(
        "```json\n{\"sql\": \"SELECT COUNT(*) FROM loans\"}\n```".to_string(),
    )));
    let ctx = context(&dir, provider.clone());

    let answer = ctx.ask("how many loans are there?").await.unwrap();
    assert_eq!(answer, "The portfolio holds 3 loans.");

    let prompts = provider.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 2);

    // SQL prompt carries the dictionary; answer prompt carries the scalar
    // result bare, not as a nested array.
    assert!(prompts[0].contains("\"loans\""));
    assert!(prompts[0].contains("how many loans are there?"));
    assert!(prompts[1].contains("The database query returned: 3"));
    assert!(!prompts[1].contains("[[3]]"));
}

#[tokio::test]
async fn test_model_emitting_bad_sql_surfaces_turn_error() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(RoutingProvider::new(Ok(
        "{\"sql\": \"SELECT * FROM no_such_table\"}".to_string(),
    )));
    let ctx = context(&dir, provider);

    let err = ctx.ask("list the widgets").await.unwrap_err();
    assert!(matches!(err, AssistantError::SqlError(_)));
}

#[tokio::test]
async fn test_failed_turn_does_not_poison_the_next() {
    let dir = tempfile::tempdir().unwrap();

    let bad = Arc::new(RoutingProvider::new(Ok(
        "{\"sql\": \"SELEC garbage\"}".to_string(),
    )));
    let ctx = context(&dir, bad);
    assert!(ctx.ask("first question").await.is_err());

    // Same database file, fresh provider: the failure above must not have
    // left a connection or any state behind.
    let good = Arc::new(RoutingProvider::new(Ok(
        "{\"sql\": \"SELECT customer FROM loans ORDER BY loan_id\"}".to_string(),
    )));
    let config = AppConfig {
        database: dir.path().join("bank.db"),
        dictionary: dir.path().join("unused.json"),
        model: "scripted".to_string(),
    };
    let ctx = AppContext::with_provider(&config, dictionary(), good);

    let answer = ctx.ask("second question").await.unwrap();
    assert_eq!(answer, "The portfolio holds 3 loans.");
}

#[tokio::test]
async fn test_multi_row_result_serialized_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(RoutingProvider::new(Ok(
        "{\"sql\": \"SELECT loan_id, customer FROM loans ORDER BY loan_id LIMIT 2\"}".to_string(),
    )));
    let ctx = context(&dir, provider.clone());

    ctx.ask("list the first two loans").await.unwrap();

    let prompts = provider.prompts.lock().unwrap();
    assert!(prompts[1].contains(r#"[[1,"Alice"],[2,"Bob"]]"#));
}

#[tokio::test]
async fn test_retry_exhaustion_is_a_turn_error() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(RoutingProvider::new(Err(AssistantError::EmptyGeneration(
        "filtered".to_string(),
    ))));
    let ctx = context(&dir, provider.clone());

    let err = ctx.ask("what is the largest loan?").await.unwrap_err();
    assert!(err.is_empty_generation());

    // One original attempt plus exactly one retry.
    assert_eq!(provider.prompts.lock().unwrap().len(), 2);
}
