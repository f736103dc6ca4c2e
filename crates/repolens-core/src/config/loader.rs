//! Layered configuration loading

use super::env_loader::apply_process_env;
use super::file_loader::load_from_file;
use super::model::Config;
use crate::error::RepolensResult;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "repolens.toml";

/// Location used when no config file is given and none exists locally:
/// `~/.config/repolens/config.toml` (platform equivalent).
pub fn default_config_path() -> PathBuf {
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return local;
    }
    dirs::config_dir()
        .map(|dir| dir.join("repolens").join("config.toml"))
        .unwrap_or(local)
}

/// Load configuration in this order:
/// 1. Default configuration
/// 2. Config file (the given path, or [`default_config_path`])
/// 3. Environment variables
///
/// The result is validated before being returned.
pub fn load_config(config_file: Option<&Path>) -> RepolensResult<Config> {
    let path = config_file
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);
    debug!("Loading configuration from {}", path.display());

    let mut config = load_from_file(&path)?;
    apply_process_env(&mut config)?;
    config.validate()?;
    Ok(config)
}
