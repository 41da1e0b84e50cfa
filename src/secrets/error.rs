//! Error types for secret store operations.

use thiserror::Error;

/// Result type for secret store operations.
pub type Result<T> = std::result::Result<T, SecretsError>;

/// Errors that can occur while talking to a secret store.
#[derive(Error, Debug)]
pub enum SecretsError {
    /// Authentication with the store was rejected.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// The store could not be reached (DNS, connect, timeout).
    #[error("Store connection failed: {message}")]
    ConnectionFailed { message: String },

    /// The store answered with a non-success status.
    #[error("Store returned status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    /// The store answered with a body we could not decode.
    #[error("Malformed store response: {message}")]
    MalformedResponse { message: String },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl SecretsError {
    /// Create an authentication failed error.
    pub fn authentication_failed(message: impl Into<String>) -> Self {
        Self::AuthenticationFailed { message: message.into() }
    }

    /// Create a connection failed error.
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed { message: message.into() }
    }

    /// Create an unexpected status error.
    pub fn unexpected_status(status: u16, message: impl Into<String>) -> Self {
        Self::UnexpectedStatus { status, message: message.into() }
    }

    /// Create a malformed response error.
    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self::MalformedResponse { message: message.into() }
    }

    /// Create a config error.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError { message: message.into() }
    }
}

impl From<reqwest::Error> for SecretsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::ConnectionFailed { message: format!("request timed out: {}", err) }
        } else if err.is_decode() {
            Self::MalformedResponse { message: err.to_string() }
        } else {
            Self::ConnectionFailed { message: err.to_string() }
        }
    }
}
