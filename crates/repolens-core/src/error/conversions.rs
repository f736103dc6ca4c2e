//! From trait implementations for RepolensError conversions

use super::types::RepolensError;

impl From<std::io::Error> for RepolensError {
    fn from(error: std::io::Error) -> Self {
        Self::unexpected(format!("I/O error: {}", error))
    }
}

impl From<serde_json::Error> for RepolensError {
    fn from(error: serde_json::Error) -> Self {
        Self::unexpected(format!("JSON error: {}", error))
    }
}

impl From<reqwest::Error> for RepolensError {
    fn from(error: reqwest::Error) -> Self {
        let status_code = error.status().map(|s| s.as_u16());
        let url = error.url().map(|u| u.to_string());
        Self::UpstreamFailure {
            message: error.to_string(),
            url,
            status_code,
            context: None,
        }
    }
}
