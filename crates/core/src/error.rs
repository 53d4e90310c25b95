//! Error types for the metaprompt domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; [`Error`] is the umbrella
//! the CLI sees.

use std::path::PathBuf;
use thiserror::Error;

use crate::provider::ModelAttempt;

/// The top-level error type for all metaprompt operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Input errors ---
    #[error("Failed to read template at {path}: {reason}")]
    Template { path: PathBuf, reason: String },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Color error: {0}")]
    Color(#[from] ColorError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Session ---
    #[error("Operation cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether this error is the user backing out of the wizard.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("'{0}' is not a 3- or 6-digit hex color")]
    InvalidHex(String),
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Model {0} returned no text")]
    EmptyResponse(String),
}

#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    #[error("no models configured for enhancement")]
    NoModels,

    #[error("all {} models failed. Last error: {last_error}", .attempts.len())]
    Exhausted {
        attempts: Vec<ModelAttempt>,
        last_error: ProviderError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::AttemptOutcome;

    #[test]
    fn provider_error_displays_correctly() {
        let err = ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        };
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn template_error_names_the_path() {
        let err = Error::Template {
            path: PathBuf::from("/missing/NextJs.startup.md"),
            reason: "No such file or directory".into(),
        };
        assert!(err.to_string().contains("/missing/NextJs.startup.md"));
        assert!(!err.is_cancellation());
    }

    #[test]
    fn exhausted_reports_last_error() {
        let last = ProviderError::ModelNotFound("gemini-1.5-flash".into());
        let err = PipelineError::Exhausted {
            attempts: vec![
                ModelAttempt {
                    model: "gemini-2.5-pro".into(),
                    outcome: AttemptOutcome::Failed(ProviderError::Network("reset".into())),
                },
                ModelAttempt {
                    model: "gemini-1.5-flash".into(),
                    outcome: AttemptOutcome::Failed(last.clone()),
                },
            ],
            last_error: last,
        };
        let text = err.to_string();
        assert!(text.contains("all 2 models failed"));
        assert!(text.contains("gemini-1.5-flash"));
    }

    #[test]
    fn cancellation_is_distinguished() {
        assert!(Error::Cancelled.is_cancellation());
    }
}
