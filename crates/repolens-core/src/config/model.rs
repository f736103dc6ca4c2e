//! Configuration data model

use super::logging_config::LoggingConfig;
use crate::cache::CacheConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub cache: CacheConfig,
    pub github: GithubConfig,
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Copy suitable for printing: secrets are masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.github.token.is_some() {
            copy.github.token = Some("********".to_string());
        }
        copy
    }
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
        }
    }
}

/// Hosting provider (GitHub) settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    /// REST API root
    pub api_base_url: String,
    /// Prefix every accepted repository URL must start with
    pub web_base_url: String,
    /// Personal access token; raises rate limits and unlocks private repos
    pub token: Option<String>,
    /// Per-request timeout
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            web_base_url: "https://github.com/".to_string(),
            token: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("repolens/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Analysis policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Repositories whose estimated token count exceeds this are rejected
    pub max_tokens: u64,
    /// Glob patterns excluded from ingestion
    pub exclude_patterns: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_tokens: 750_000,
            exclude_patterns: vec!["tests/*".to_string(), "docs/*".to_string()],
        }
    }
}
