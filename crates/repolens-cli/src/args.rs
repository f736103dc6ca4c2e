//! CLI argument definitions using clap
//!
//! - repolens                     # Serve the HTTP API (default)
//! - repolens serve --port 8080   # Serve on another port
//! - repolens analyze <url>       # One-shot analysis printed as JSON
//! - repolens cache stats|clear   # Inspect or empty the cache
//! - repolens config show|init    # Utility commands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "repolens")]
#[command(about = "Repolens - analyze the structure and activity of GitHub repositories")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (TOML, YAML or JSON)
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Analyze one repository and print the result as JSON
    Analyze {
        /// Repository URL, e.g. https://github.com/owner/repo
        url: String,

        /// Print the structure as an indented tree instead of JSON
        #[arg(long)]
        tree: bool,
    },

    /// Inspect or clear the repository cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Manage configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum CacheAction {
    /// Show entry count, size and expiry status
    Stats,
    /// Delete every cache entry
    Clear,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
