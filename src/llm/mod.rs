//! LLM backends and the prompt-driven synthesizers built on them.

pub mod answer_builder;
pub mod bedrock;
pub mod extract;
pub mod gemini;
pub mod provider;
pub mod sql_builder;

pub use answer_builder::AnswerBuilder;
pub use bedrock::BedrockClient;
pub use extract::{extract_sql_payload, strip_code_fences};
pub use gemini::GeminiClient;
pub use provider::{provider_from_env, GenerationOptions, GenerationProvider};
pub use sql_builder::SqlBuilder;
