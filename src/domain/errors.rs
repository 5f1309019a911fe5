//! Domain error types
//!
//! This module defines the error hierarchy for PiiGuard. Errors never carry
//! detected values, only descriptions of what failed.

use thiserror::Error;

/// Main PiiGuard error type
///
/// This is the error type used at module boundaries. Detection and masking
/// are total and never produce one.
#[derive(Debug, Error)]
pub enum PiiGuardError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl PiiGuardError {
    /// Process exit code for this error
    ///
    /// Configuration problems exit with 2, everything else with 5.
    pub fn exit_code(&self) -> i32 {
        match self {
            PiiGuardError::Configuration(_) => 2,
            _ => 5,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for PiiGuardError {
    fn from(err: std::io::Error) -> Self {
        PiiGuardError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for PiiGuardError {
    fn from(err: serde_json::Error) -> Self {
        PiiGuardError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PiiGuardError {
    fn from(err: toml::de::Error) -> Self {
        PiiGuardError::Configuration(format!("TOML parse error: {err}"))
    }
}
