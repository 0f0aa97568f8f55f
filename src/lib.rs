//! askdb - natural-language question answering over a SQLite database.
//!
//! A two-step LLM pipeline: the user's question plus a JSON data dictionary
//! become a SQLite query, the query runs against a local database file, and
//! a second LLM call phrases the fetched rows as a natural-language answer.
//!
//! Two interchangeable backends sit behind one trait:
//! - Gemini `generateContent` (API-key auth, relaxed safety thresholds)
//! - Amazon Bedrock `InvokeModel` (access-key/region auth)

pub mod context;
pub mod llm;
pub mod query;
pub mod repl;
pub mod schema;
pub mod types;

pub use context::{AppConfig, AppContext};
pub use types::{AssistantError, Result};
