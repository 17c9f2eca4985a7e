//!
//! Error handling for the toolgate translation gateway.
//!
//! Defines all error types used throughout the application using thiserror.
//! Every request-level variant stays local to the request that produced it.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use thiserror::Error;

/* --- types ----------------------------------------------------------------------------------- */

///
/// Application error types.
///
/// The first group covers one translated request end to end (decode, translate,
/// sanitize, forward); the second group covers startup concerns.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid request body: {0}")]
    InvalidRequestBody(String),

    #[error("Malformed content: {0}")]
    MalformedContent(String),

    #[error("Failed to decode sanitized payload: {0}")]
    SanitationDecode(String),

    #[error("Backend unreachable: {0}")]
    BackendUnreachable(String),

    #[error("Backend timed out: {0}")]
    BackendTimeout(String),

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/* --- start of code -------------------------------------------------------------------------- */

impl GatewayError {
    ///
    /// Classify a transport failure from the backend client.
    ///
    /// # Arguments
    ///  * `err` - error returned by reqwest while sending or reading
    ///
    /// # Returns
    ///  * `BackendTimeout`, `BackendUnreachable` or `BackendError`
    pub fn from_backend(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::BackendTimeout(err.to_string())
        } else if err.is_connect() {
            GatewayError::BackendUnreachable(err.to_string())
        } else {
            GatewayError::BackendError(err.to_string())
        }
    }

    /// Whether the caller sent something we cannot translate.
    pub fn is_client_error(&self) -> bool {
        matches!(self, GatewayError::InvalidRequestBody(_) | GatewayError::MalformedContent(_))
    }
}

/// Result type alias for cleaner error handling throughout the application
pub type Result<T> = std::result::Result<T, GatewayError>;

/* --- tests ------------------------------------------------------------------------------- */
