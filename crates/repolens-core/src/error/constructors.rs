//! Constructor methods for RepolensError

use super::types::RepolensError;

impl RepolensError {
    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: None,
            context: None,
        }
    }

    /// Create an invalid input error naming the offending field
    pub fn invalid_input_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: Some(field.into()),
            context: None,
        }
    }

    /// Create a new not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            context: None,
        }
    }

    /// Create a too-large error carrying the estimate and the ceiling
    pub fn too_large(estimated_tokens: u64, limit: u64) -> Self {
        Self::TooLarge {
            message: format!(
                "estimated {} tokens exceeds the limit of {}",
                estimated_tokens, limit
            ),
            estimated_tokens: Some(estimated_tokens),
            limit: Some(limit),
        }
    }

    /// Create a new forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
            context: None,
        }
    }

    /// Create a new upstream failure
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamFailure {
            message: message.into(),
            url: None,
            status_code: None,
            context: None,
        }
    }

    /// Create an upstream failure for a non-success HTTP response
    pub fn upstream_status(
        message: impl Into<String>,
        url: impl Into<String>,
        status_code: u16,
    ) -> Self {
        Self::UpstreamFailure {
            message: message.into(),
            url: Some(url.into()),
            status_code: Some(status_code),
            context: None,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: None,
        }
    }

    /// Create a configuration error with context
    pub fn config_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            context: Some(context.into()),
        }
    }

    /// Create a new unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
            context: None,
        }
    }

    /// Attach context to any variant that carries it
    pub fn with_context(mut self, new_context: impl Into<String>) -> Self {
        let new_context = Some(new_context.into());
        match &mut self {
            Self::InvalidInput { context, .. }
            | Self::NotFound { context, .. }
            | Self::Forbidden { context, .. }
            | Self::UpstreamFailure { context, .. }
            | Self::Config { context, .. }
            | Self::Unexpected { context, .. } => *context = new_context,
            Self::TooLarge { .. } => {}
        }
        self
    }
}
