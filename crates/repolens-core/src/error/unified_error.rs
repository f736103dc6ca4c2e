//! UnifiedError trait implementation for RepolensError

use super::types::{RepolensError, UnifiedError};

impl UnifiedError for RepolensError {
    fn error_code(&self) -> &str {
        match self {
            Self::InvalidInput { .. } => "REPOLENS_INVALID_INPUT",
            Self::NotFound { .. } => "REPOLENS_NOT_FOUND",
            Self::TooLarge { .. } => "REPOLENS_TOO_LARGE",
            Self::Forbidden { .. } => "REPOLENS_FORBIDDEN",
            Self::UpstreamFailure { .. } => "REPOLENS_UPSTREAM",
            Self::Config { .. } => "REPOLENS_CONFIG",
            Self::Unexpected { .. } => "REPOLENS_UNEXPECTED",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::InvalidInput { message, .. } => message,
            Self::NotFound { message, .. } => message,
            Self::TooLarge { message, .. } => message,
            Self::Forbidden { message, .. } => message,
            Self::UpstreamFailure { message, .. } => message,
            Self::Config { message, .. } => message,
            Self::Unexpected { message, .. } => message,
        }
    }

    fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { context, .. } => context.as_deref(),
            Self::NotFound { context, .. } => context.as_deref(),
            Self::TooLarge { .. } => None,
            Self::Forbidden { context, .. } => context.as_deref(),
            Self::UpstreamFailure { context, .. } => context.as_deref(),
            Self::Config { context, .. } => context.as_deref(),
            Self::Unexpected { context, .. } => context.as_deref(),
        }
    }

    fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput { .. } | Self::TooLarge { .. } => 400,
            Self::Forbidden { .. } => 403,
            Self::NotFound { .. } => 404,
            Self::UpstreamFailure { .. } | Self::Config { .. } | Self::Unexpected { .. } => 500,
        }
    }
}
