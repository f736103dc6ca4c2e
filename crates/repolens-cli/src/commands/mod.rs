//! CLI commands

pub mod analyze;
pub mod cache;
pub mod config;
pub mod serve;
