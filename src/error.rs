//! Unified error type hierarchy for the Architecture Pattern Evaluator
//!
//! Provides structured error handling with ConfigError, ScoringError, ProbeError
//! and the user-facing AppError.
//!
//! Missing documents and missing catalog keys are NOT errors: they are recovered
//! locally with documented defaults (see `catalog`).

use std::io;
use thiserror::Error;

/// Document and settings file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Document not found: {0}")]
    FileNotFound(String),

    #[error("Invalid JSON in document: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Document validation failed: {0}")]
    ValidationFailed(String),

    #[error("IO error during document operations: {0}")]
    IoError(#[from] io::Error),
}

/// Normalization and weighted scoring errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// Weight map sums to zero, or contains a negative / non-finite weight
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    #[error("Catalog contains no patterns to score")]
    EmptyCatalog,
}

/// Test probe errors (real HTTP prober setup only).
///
/// Individual request failures are never surfaced here: they are counted
/// into the error rate of the probe result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProbeError {
    #[error("Invalid probe URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP client could not be built: {0}")]
    ClientBuild(String),

    #[error("Latency histogram error: {0}")]
    Histogram(String),
}

/// Global error type surfaced to the presentation layer.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// Catalog document could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Settings persist or deserialize error
    #[error("Settings error: {0}")]
    Settings(String),

    /// Weighted scoring rejected its input
    #[error("Scoring error: {0}")]
    Scoring(#[from] ScoringError),

    /// Probe could not be started
    #[error("Probe error: {0}")]
    Probe(#[from] ProbeError),

    /// Invalid input (e.g., malformed weight argument)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Get a user-facing error message suitable for display
    pub fn user_message(&self) -> String {
        match self {
            AppError::Storage(msg) => format!("Could not access the pattern catalog: {}", msg),
            AppError::Settings(msg) => format!("Settings error: {}", msg),
            AppError::Scoring(ScoringError::InvalidWeights(msg)) => {
                format!("Please give at least one metric a non-zero importance ({})", msg)
            }
            AppError::Scoring(ScoringError::EmptyCatalog) => {
                "There are no architecture patterns to compare".to_string()
            }
            AppError::Probe(e) => format!("Test could not be started: {}", e),
            AppError::InvalidInput(msg) => format!("Invalid input: {}", msg),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Storage(e.to_string())
    }
}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

/// Top-level result type for operations that may fail.
/// Example: `fn risky_operation() -> Result<String>`
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
