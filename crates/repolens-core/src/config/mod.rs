//! Configuration management for repolens
//!
//! Settings are layered: built-in defaults, then an optional config file
//! (TOML, YAML or JSON by extension), then environment variables. The CLI
//! applies its own flags on top of the result.

mod env_loader;
mod file_loader;
mod loader;
mod logging_config;
mod model;
mod validation;

pub use env_loader::{apply_env, apply_process_env};
pub use file_loader::{load_from_file, save_to_file};
pub use loader::{DEFAULT_CONFIG_FILE, default_config_path, load_config};
pub use logging_config::LoggingConfig;
pub use model::{AnalysisConfig, Config, GithubConfig, ServerConfig};
