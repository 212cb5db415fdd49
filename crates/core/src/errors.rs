//! Core error types for the Centavo application.
//!
//! This module defines transport-agnostic error types. Backend-specific
//! failures (HTTP statuses, body parse errors, etc.) are converted to these
//! types by the gateway layer.

use chrono::ParseError as ChronoParseError;
use std::num::ParseFloatError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the finance application.
///
/// Remote failures are wrapped in string form to keep this type agnostic of
/// the backend client in use.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Remote operation failed: {0}")]
    Remote(#[from] RemoteError),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to load configuration: {0}")]
    ConfigIO(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Missing configuration key: {0}")]
    MissingConfigKey(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Backend-agnostic error type for remote gateway operations.
///
/// The gateway converts HTTP and wire-format failures into this format; the
/// store surfaces the human-readable message to the user unchanged.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The request never produced a response (network failure, timeout).
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The backend answered with a non-success status.
    #[error("Backend rejected the request ({status}): {message}")]
    Api { status: u16, message: String },

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// The response body did not match the expected record shape.
    #[error("Failed to parse backend response: {0}")]
    ParseFailed(String),

    /// The caller holds no valid session for an authenticated endpoint.
    #[error("Not authenticated")]
    Unauthorized,
}

/// Validation errors for user input, raised before any remote call.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Failed to parse number: {0}")]
    NumberParse(#[from] ParseFloatError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] ChronoParseError),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Remote(RemoteError::ParseFailed(err.to_string()))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateTimeParse(err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
