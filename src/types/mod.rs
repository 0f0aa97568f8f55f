//! Core types for the assistant.
//!
//! Defines the error enum used across all components and the crate-wide
//! `Result` alias.

pub mod error;
pub mod result;

pub use error::AssistantError;
pub use result::Result;
