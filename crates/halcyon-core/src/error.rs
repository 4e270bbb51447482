//! Core error types for halcyon-core.
//!
//! This module defines the error hierarchy using thiserror. The split
//! mirrors how failures are surfaced to callers: validation problems are
//! rejected before any backend call, missing authentication turns mutations
//! into failures (and loads into no-ops), and backend problems carry the
//! provider's message when one exists.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for halcyon-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input rejected before reaching the backend.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Operation requires a signed-in user.
    #[error("Not signed in")]
    NotAuthenticated,

    /// The backend access layer reported a failure.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context.
    #[error("{0}")]
    Custom(String),
}

/// Failures reported by (or while reaching) the hosted backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// The provider rejected the request and supplied a message.
    #[error("{0}")]
    Provider(String),

    /// No record matched the given identifier.
    #[error("Record not found")]
    NotFound,

    /// Unexpected connectivity failure during the round-trip. Always caught
    /// at the backend boundary and surfaced as this generic variant.
    #[error("Connection error")]
    Connection(#[source] Option<reqwest::Error>),

    /// The provider returned a payload the client could not decode.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        BackendError::Connection(Some(err))
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Decode(err.to_string())
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration.
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration.
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration.
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// A dot-separated key that names no config field.
    #[error("Unknown config key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Emotion intensity outside the 1-5 scale.
    #[error("Intensity must be between 1 and 5 (got {0})")]
    IntensityOutOfRange(u8),

    /// A required text field was empty or whitespace.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    /// Timer duration outside its allowed bounds.
    #[error("{mode} duration must be between {min} and {max} minutes (got {value})")]
    DurationOutOfRange {
        mode: &'static str,
        min: u32,
        max: u32,
        value: u32,
    },

    /// Custom date range with end before start.
    #[error("Range end ({end}) must not precede start ({start})")]
    InvalidRange {
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },
}

/// Result type alias for CoreError.
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
