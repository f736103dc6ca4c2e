//! Core error types and traits for repolens

use thiserror::Error;

/// Result type alias for repolens operations
pub type RepolensResult<T> = Result<T, RepolensError>;

/// Uniform accessors shared by every repolens error.
pub trait UnifiedError: std::error::Error + Send + Sync {
    /// Stable code for programmatic handling
    fn error_code(&self) -> &str;

    /// Human-readable message without the variant prefix
    fn message(&self) -> &str;

    /// Optional context about where the error occurred
    fn context(&self) -> Option<&str> {
        None
    }

    /// HTTP status the request boundary answers with
    fn status_code(&self) -> u16;
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Convert any displayable error into an `Unexpected` error with context
    fn context<C: std::fmt::Display>(self, context: C) -> RepolensResult<T>;

    /// Add context lazily (only evaluated on error)
    fn with_context<C: std::fmt::Display, F: FnOnce() -> C>(self, f: F) -> RepolensResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn context<C: std::fmt::Display>(self, context: C) -> RepolensResult<T> {
        self.map_err(|e| RepolensError::unexpected(format!("{}: {}", context, e)))
    }

    fn with_context<C: std::fmt::Display, F: FnOnce() -> C>(self, f: F) -> RepolensResult<T> {
        self.map_err(|e| RepolensError::unexpected(format!("{}: {}", f(), e)))
    }
}

/// Main error type for repolens
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepolensError {
    /// Missing or malformed request input
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        field: Option<String>,
        context: Option<String>,
    },

    /// Repository unreachable or absent
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        context: Option<String>,
    },

    /// Repository exceeds the configured size ceiling
    #[error("Repository too large: {message}")]
    TooLarge {
        message: String,
        estimated_tokens: Option<u64>,
        limit: Option<u64>,
    },

    /// Private repository or provider rate limit
    #[error("Forbidden: {message}")]
    Forbidden {
        message: String,
        context: Option<String>,
    },

    /// Ingestion or metadata collaborator failed
    #[error("Upstream failure: {message}")]
    UpstreamFailure {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
        context: Option<String>,
    },

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: Option<String>,
    },

    /// Anything uncategorized
    #[error("Unexpected error: {message}")]
    Unexpected {
        message: String,
        context: Option<String>,
    },
}
