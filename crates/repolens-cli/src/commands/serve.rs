//! `repolens serve`

use crate::server::{ApiState, start_http_server};
use repolens_core::build_orchestrator;
use repolens_core::config::Config;
use repolens_core::error::{RepolensError, RepolensResult};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::info;

pub async fn serve(config: Config) -> RepolensResult<()> {
    let addr = socket_addr(&config.server.host, config.server.port)?;
    let orchestrator = build_orchestrator(&config)?;
    info!(
        cache_dir = %config.cache.dir.display(),
        ttl = ?config.cache.ttl,
        max_entries = config.cache.max_entries,
        "Starting repolens API"
    );

    let state = Arc::new(ApiState::new(orchestrator, config.github.web_base_url.clone()));
    start_http_server(state, addr).await
}

fn socket_addr(host: &str, port: u16) -> RepolensResult<SocketAddr> {
    let ip: IpAddr = host.parse().map_err(|_| {
        RepolensError::config_with_context(
            format!("Invalid server.host '{}'", host),
            "Expected an IP address such as 0.0.0.0 or 127.0.0.1",
        )
    })?;
    Ok(SocketAddr::new(ip, port))
}
