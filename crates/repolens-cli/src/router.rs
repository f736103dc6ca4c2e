//! Command routing logic for CLI

use crate::args::{CacheAction, Cli, Commands, ConfigAction};
use crate::commands;
use crate::logging::init_logging;
use repolens_core::config::{Config, default_config_path, load_config};
use repolens_core::error::RepolensResult;
use std::path::Path;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> RepolensResult<()> {
    let config_file = cli.config_file.as_deref();

    match cli.command {
        None => commands::serve::serve(load(config_file)?).await,
        Some(Commands::Serve { host, port }) => {
            let config = apply_server_overrides(load(config_file)?, host, port);
            commands::serve::serve(config).await
        }
        Some(Commands::Analyze { url, tree }) => {
            commands::analyze::analyze(&load(config_file)?, &url, tree).await
        }
        Some(Commands::Cache { action }) => {
            let config = load(config_file)?;
            match action {
                CacheAction::Stats => commands::cache::stats(&config).await,
                CacheAction::Clear => commands::cache::clear(&config).await,
            }
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&load(config_file)?, config_file).await,
            // Must work even when the existing file is broken, so nothing is loaded.
            ConfigAction::Init { force } => {
                let path = config_file
                    .map(Path::to_path_buf)
                    .unwrap_or_else(default_config_path);
                commands::config::init(&path, force).await
            }
        },
    }
}

/// Load layered configuration and install logging from it.
fn load(config_file: Option<&Path>) -> RepolensResult<Config> {
    let config = load_config(config_file)?;
    init_logging(&config.logging);
    Ok(config)
}

fn apply_server_overrides(mut config: Config, host: Option<String>, port: Option<u16>) -> Config {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config
}
