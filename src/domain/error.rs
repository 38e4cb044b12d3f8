//! Domain-level error types for slack-stars.
//!
//! All errors are typed with `thiserror` and provide meaningful context
//! without exposing internal details to end users.

use thiserror::Error;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP transport failed before a Slack response was obtained.
    #[error("API request failed: {message}")]
    Api {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// Slack answered but reported `ok: false`.
    #[error("Slack error from {method}: {code}")]
    Slack { method: &'static str, code: String },

    /// CSV serialization or writing failed.
    #[error("CSV error: {message}")]
    Csv {
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl AppError {
    /// Create an API transport error from a reqwest error.
    pub fn api(err: reqwest::Error) -> Self {
        Self::Api {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a Slack platform error from an `ok: false` envelope.
    pub fn slack(method: &'static str, code: impl Into<String>) -> Self {
        Self::Slack {
            method,
            code: code.into(),
        }
    }

    /// Create a CSV error.
    pub fn csv(err: csv::Error) -> Self {
        Self::Csv {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
