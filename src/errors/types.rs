//! Application-level error type, built on `thiserror`.

use crate::secrets::SecretsError;

/// Custom result type for secretferry operations.
pub type Result<T> = std::result::Result<T, FerryError>;

/// Main error type for the sync process.
#[derive(thiserror::Error, Debug)]
pub enum FerryError {
    /// Configuration errors. These abort a pass before any store I/O.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Store-level errors surfaced from a secret store client.
    #[error("Secret store error: {0}")]
    Secrets(SecretsError),

    /// I/O errors with additional context.
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },

    /// Internal errors that should not occur in normal operation.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl FerryError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into(), source: None }
    }

    /// Create a configuration error with source.
    pub fn config_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Config { message: message.into(), source: Some(source) }
    }

    /// Create an internal error.
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Whether this error is a configuration problem.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

impl From<SecretsError> for FerryError {
    fn from(error: SecretsError) -> Self {
        match error {
            // Store misconfiguration is a pass-aborting config error.
            SecretsError::ConfigError { message } => Self::Config { message, source: None },
            other => Self::Secrets(other),
        }
    }
}

impl From<std::io::Error> for FerryError {
    fn from(error: std::io::Error) -> Self {
        Self::Io { source: error, context: "I/O operation failed".to_string() }
    }
}

impl From<validator::ValidationErrors> for FerryError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let error_messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string())
                    })
                    .collect();
                format!("{}: {}", field, error_messages.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self::config(format!("Validation failed: {}", message))
    }
}
