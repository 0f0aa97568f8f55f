//! Result type alias for assistant operations.

use crate::types::error::AssistantError;

/// Convenient result type used throughout the crate.
pub type Result<T> = std::result::Result<T, AssistantError>;
