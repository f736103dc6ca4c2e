//! Repolens command-line interface and HTTP API

pub mod args;
pub mod commands;
pub mod console;
pub mod logging;
pub mod router;
pub mod server;

pub use args::{CacheAction, Cli, Commands, ConfigAction};
pub use server::{ApiState, routes, start_http_server};
