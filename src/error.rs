//! Error types
//!
//! Defines the errors raised by the gateway, the store and form validation.

use thiserror::Error;

/// Errors returned by a `Gateway` implementation
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Credentials refused (unknown account, wrong password, duplicate email)
    #[error("Rejected: {0}")]
    Rejected(String),

    /// Session token missing or no longer accepted
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    #[error("Gateway unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body did not match the expected envelope
    #[error("Decode error: {0}")]
    Decode(String),

    /// Mock backing file could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

/// Result type alias for gateway calls
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors surfaced by `Store` operations
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Protected operation attempted without a persisted session token
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The response belongs to a session that ended while the call was in flight
    #[error("Session ended before the response arrived")]
    StaleSession,

    #[error("{0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias for store operations
pub type AppResult<T> = Result<T, AppError>;

/// Field-presence failures detected before anything is submitted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Duration must be between {min} and {max} minutes")]
    DurationOutOfRange { min: u32, max: u32 },
}
