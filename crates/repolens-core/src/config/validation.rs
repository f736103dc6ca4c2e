//! Configuration validation

use super::logging_config::LoggingConfig;
use super::model::Config;
use crate::error::{RepolensError, RepolensResult};

impl Config {
    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> RepolensResult<()> {
        if self.cache.max_entries == 0 {
            return Err(RepolensError::config(
                "cache.max_entries must be at least 1",
            ));
        }
        if self.cache.ttl.is_zero() {
            return Err(RepolensError::config("cache.ttl must be greater than zero"));
        }
        if self.analysis.max_tokens == 0 {
            return Err(RepolensError::config(
                "analysis.max_tokens must be greater than zero",
            ));
        }
        if self.github.api_base_url.trim().is_empty() {
            return Err(RepolensError::config("github.api_base_url must not be empty"));
        }
        if !self.github.web_base_url.ends_with('/') {
            return Err(RepolensError::config(format!(
                "github.web_base_url must end with '/', got '{}'",
                self.github.web_base_url
            )));
        }
        for pattern in &self.analysis.exclude_patterns {
            glob::Pattern::new(pattern).map_err(|e| {
                RepolensError::config(format!("Invalid exclude pattern '{}': {}", pattern, e))
            })?;
        }
        validate_logging(&self.logging)
    }
}

fn validate_logging(logging: &LoggingConfig) -> RepolensResult<()> {
    if !LoggingConfig::LEVELS.contains(&logging.level.to_lowercase().as_str()) {
        return Err(RepolensError::config(format!(
            "Unknown log level '{}'. Valid levels are: {:?}",
            logging.level,
            LoggingConfig::LEVELS
        )));
    }
    if !LoggingConfig::FORMATS.contains(&logging.format.to_lowercase().as_str()) {
        return Err(RepolensError::config(format!(
            "Unknown log format '{}'. Valid formats are: {:?}",
            logging.format,
            LoggingConfig::FORMATS
        )));
    }
    Ok(())
}
