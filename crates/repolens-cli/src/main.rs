//! Repolens CLI application
//!
//! Serves the analysis HTTP API by default; `repolens --help` lists the
//! utility commands.

use clap::Parser;
use repolens_cli::{Cli, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    router::route(cli).await?;
    Ok(())
}
