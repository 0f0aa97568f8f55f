//! Data dictionary loading and prompt serialization.

pub mod dictionary;

pub use dictionary::DataDictionary;
