//! Environment variable-based configuration overrides

use super::model::Config;
use crate::error::{RepolensError, RepolensResult};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Apply overrides from the process environment.
pub fn apply_process_env(config: &mut Config) -> RepolensResult<()> {
    apply_env(config, |name| std::env::var(name).ok())
}

/// Apply overrides read through `lookup`
///
/// Recognized variables use the `REPOLENS_` prefix, except for the GitHub
/// credentials which follow the usual `GITHUB_TOKEN` / `GITHUB_API_URL` names.
/// Empty values are ignored.
pub fn apply_env<F>(config: &mut Config, lookup: F) -> RepolensResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(host) = var("REPOLENS_HOST") {
        config.server.host = host;
    }
    if let Some(port) = var("REPOLENS_PORT") {
        config.server.port = parse_number("REPOLENS_PORT", &port)?;
    }

    if let Some(dir) = var("REPOLENS_CACHE_DIR") {
        config.cache.dir = PathBuf::from(dir);
    }
    if let Some(ttl) = var("REPOLENS_CACHE_TTL") {
        config.cache.ttl = parse_duration("REPOLENS_CACHE_TTL", &ttl)?;
    }
    if let Some(max) = var("REPOLENS_CACHE_MAX_ENTRIES") {
        config.cache.max_entries = parse_number("REPOLENS_CACHE_MAX_ENTRIES", &max)?;
    }

    if let Some(max_tokens) = var("REPOLENS_MAX_TOKENS") {
        config.analysis.max_tokens = parse_number("REPOLENS_MAX_TOKENS", &max_tokens)?;
    }

    if let Some(token) = var("GITHUB_TOKEN") {
        config.github.token = Some(token);
    }
    if let Some(url) = var("GITHUB_API_URL") {
        config.github.api_base_url = url;
    }

    if let Some(level) = var("REPOLENS_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(format) = var("REPOLENS_LOG_FORMAT") {
        config.logging.format = format;
    }

    Ok(())
}

fn parse_number<T: FromStr>(name: &str, value: &str) -> RepolensResult<T> {
    value.trim().parse().map_err(|_| {
        RepolensError::config_with_context(
            format!("Invalid {} value: '{}'", name, value),
            "Reading configuration from the environment",
        )
    })
}

fn parse_duration(name: &str, value: &str) -> RepolensResult<Duration> {
    let value = value.trim();
    // Bare integers are seconds.
    if let Ok(secs) = value.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }
    humantime_serde::re::humantime::parse_duration(value).map_err(|e| {
        RepolensError::config_with_context(
            format!("Invalid {} value '{}': {}", name, value, e),
            "Reading configuration from the environment",
        )
    })
}
