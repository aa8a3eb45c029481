//! Error types for the Extractor
//!
//! Field-level defects inside a document never reach these types; they are
//! replaced with defaults during parsing. Only reading and tokenizing the
//! document text can fail.

use thiserror::Error;

/// Errors that can occur while loading a document
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Document file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document text is not valid JSON
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
