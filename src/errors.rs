//! Error types for the VitalGuard monitor
//!
//! Every reachable failure terminates in a visible, bounded message; no
//! error class is fatal to the process.

use thiserror::Error;

/// Main error type for the monitor and orchestrator
#[derive(Error, Debug)]
pub enum GuardError {
    /// Neither a GPS fix nor manual location text is available
    #[error("No location data available")]
    LocationUnavailable,

    /// Medical-intelligence service returned an error response
    #[error("Intelligence service error: {0}")]
    IntelServiceError(String),

    /// Required-field violation on the contact record
    #[error("Validation error: {0}")]
    Validation(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// External lookup exceeded the per-episode bound
    #[error("Operation timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Generic errors with context
    #[error("Monitor error: {0}")]
    Generic(String),
}

/// Result type alias for monitor operations
pub type Result<T> = std::result::Result<T, GuardError>;

/// Convert anyhow errors to GuardError
impl From<anyhow::Error> for GuardError {
    fn from(err: anyhow::Error) -> Self {
        GuardError::Generic(err.to_string())
    }
}
