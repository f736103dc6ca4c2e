//! File-based configuration loading

use super::model::Config;
use crate::error::{RepolensError, RepolensResult};
use std::fs;
use std::path::Path;

/// Load configuration from a file
///
/// Supports JSON, TOML, and YAML formats based on file extension.
/// Returns default config if file doesn't exist.
pub fn load_from_file(path: &Path) -> RepolensResult<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        RepolensError::config_with_context(
            format!("Failed to read config file: {}", e),
            format!("Reading configuration from '{}'", path.display()),
        )
    })?;

    let config: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| {
            RepolensError::config_with_context(
                format!("Failed to parse TOML config: {}", e),
                format!("Deserializing TOML configuration from '{}'", path.display()),
            )
        })?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| {
            RepolensError::config_with_context(
                format!("Failed to parse YAML config: {}", e),
                format!("Deserializing YAML configuration from '{}'", path.display()),
            )
        })?,
        _ => serde_json::from_str(&content).map_err(|e| {
            RepolensError::config_with_context(
                format!("Failed to parse JSON config: {}", e),
                format!("Deserializing JSON configuration from '{}'", path.display()),
            )
        })?,
    };

    Ok(config)
}

/// Write configuration to a file in the format implied by its extension.
pub fn save_to_file(config: &Config, path: &Path) -> RepolensResult<()> {
    let content = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::to_string_pretty(config)
            .map_err(|e| RepolensError::config(format!("Failed to serialize TOML config: {}", e)))?,
        Some("yaml") | Some("yml") => serde_yaml::to_string(config)
            .map_err(|e| RepolensError::config(format!("Failed to serialize YAML config: {}", e)))?,
        _ => serde_json::to_string_pretty(config)
            .map_err(|e| RepolensError::config(format!("Failed to serialize JSON config: {}", e)))?,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            RepolensError::config_with_context(
                format!("Failed to create config directory: {}", e),
                parent.display().to_string(),
            )
        })?;
    }
    fs::write(path, content).map_err(|e| {
        RepolensError::config_with_context(
            format!("Failed to write config file: {}", e),
            path.display().to_string(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_from_file(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_partial_toml_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("repolens.toml");
        fs::write(
            &config_path,
            r#"
[server]
port = 8080

[cache]
ttl = "30m"
max_entries = 5

[analysis]
exclude_patterns = ["vendor/*"]
"#,
        )
        .unwrap();

        let config = load_from_file(&config_path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.cache.ttl, Duration::from_secs(30 * 60));
        assert_eq!(config.cache.max_entries, 5);
        assert_eq!(config.analysis.exclude_patterns, vec!["vendor/*"]);
        assert_eq!(config.analysis.max_tokens, 750_000);
    }

    #[test]
    fn test_load_yaml_and_json_files() {
        let temp_dir = TempDir::new().unwrap();

        let yaml_path = temp_dir.path().join("repolens.yaml");
        fs::write(&yaml_path, "logging:\n  level: debug\n  format: json\n").unwrap();
        let config = load_from_file(&yaml_path).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");

        let json_path = temp_dir.path().join("repolens.json");
        fs::write(&json_path, r#"{"github": {"timeout": "5s"}}"#).unwrap();
        let config = load_from_file(&json_path).unwrap();
        assert_eq!(config.github.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_file_is_a_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "[server\nport = ").unwrap();

        let err = load_from_file(&config_path).unwrap_err();
        assert!(matches!(err, RepolensError::Config { .. }));
    }

    #[test]
    fn test_save_then_load_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("conf").join("repolens.toml");
        let mut config = Config::default();
        config.server.port = 9000;
        config.cache.ttl = Duration::from_secs(90);

        save_to_file(&config, &config_path).unwrap();
        assert_eq!(load_from_file(&config_path).unwrap(), config);
    }
}
