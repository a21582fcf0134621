// Error types for repodesk.
// Handles Gitness API errors, configuration errors, and general application errors.

use reqwest::StatusCode;
use thiserror::Error;

/// Fallback text when a failed update carries no usable message.
pub const UPDATE_FAILED_FALLBACK: &str = "Failed to update pull request";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Gitness API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("HTTP {status}: {message}")]
    Server { status: StatusCode, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Message suitable for a notification toast.
    ///
    /// Prefers the message the server put in its error body, then the
    /// transport error, then a generic fallback.
    pub fn user_message(&self) -> String {
        let message = match self {
            AppError::Server { message, .. } | AppError::Forbidden(message) => message.trim(),
            AppError::Api(e) => return e.to_string(),
            AppError::Unauthorized | AppError::NotFound(_) => return self.to_string(),
            AppError::Other(message) => message.trim(),
            _ => "",
        };

        if message.is_empty() {
            UPDATE_FAILED_FALLBACK.to_string()
        } else {
            message.to_string()
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
