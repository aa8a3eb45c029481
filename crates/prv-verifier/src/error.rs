//! Error types for verification runs
//!
//! Lookup failures and cancellation are not errors: the former are recorded
//! as absent, the latter is a clean stop.

use thiserror::Error;

/// Errors that can occur around a verification run
#[derive(Error, Debug)]
pub enum VerifierError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Worker error (background task panicked or was aborted)
    #[error("Worker error: {0}")]
    Worker(String),
}
