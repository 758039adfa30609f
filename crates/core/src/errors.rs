//! Core error types for Fintrack.
//!
//! The backend API is the only source of failures this crate sees, so the
//! variants mirror what can go wrong on the wire: transport, status codes,
//! undecodable payloads and runaway pagination.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for dashboard operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The backend rejected the bearer token (or none was supplied).
    #[error("Unauthorized")]
    Unauthorized,

    /// The backend answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Pagination failed: {0}")]
    Pagination(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// HTTP status that best describes this error when surfaced to a caller.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Unauthorized => 401,
            Error::Api { status, .. } => *status,
            Error::Validation(_) => 400,
            _ => 500,
        }
    }

    /// Message suitable for inline display.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Validation errors for user input and query parameters.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid month {0}, expected 1-12")]
    InvalidMonth(u32),

    #[error("Unknown recurrence scope '{0}'")]
    InvalidRecurrenceScope(String),

    #[error("Failed to parse date/time: {0}")]
    DateTimeParse(#[from] chrono::ParseError),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}
