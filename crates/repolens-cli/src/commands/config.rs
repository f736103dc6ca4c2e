//! Configuration management commands

use crate::console::CliConsole;
use repolens_core::config::{Config, save_to_file};
use repolens_core::error::{RepolensError, RepolensResult};
use std::path::Path;

/// Show the effective configuration, secrets masked.
pub async fn show(config: &Config, config_file: Option<&Path>) -> RepolensResult<()> {
    let console = CliConsole::new(true);
    console.print_header("Configuration");
    match config_file {
        Some(path) if path.exists() => console.info(&format!("Loaded from: {}", path.display())),
        Some(path) => console.warn(&format!("Configuration file not found: {}", path.display())),
        None => console.info("Using defaults and environment"),
    }

    let rendered = toml::to_string_pretty(&config.redacted())
        .map_err(|e| RepolensError::config(format!("Failed to render configuration: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}

/// Write a default configuration file to `path`.
pub async fn init(path: &Path, force: bool) -> RepolensResult<()> {
    let console = CliConsole::new(true);
    if path.exists() && !force {
        return Err(RepolensError::config(format!(
            "Configuration file already exists: {} (use --force to overwrite)",
            path.display()
        )));
    }

    save_to_file(&Config::default(), path)?;
    console.success(&format!("Configuration file created: {}", path.display()));
    Ok(())
}
