use std::path::Path;

use anyhow::{Context, Result};
use gitme_server::{AppConfig, AppState, serve};
use tracing::info;

use super::signals::shutdown_signal;

/// Run the HTTP API until SIGINT or SIGTERM
pub async fn run_serve(
    config: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let mut config = AppConfig::load(config).context("Failed to load configuration")?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    info!(
        gemini_configured = config.providers.gemini.api_key.is_some(),
        groq_configured = config.providers.groq.api_key.is_some(),
        github_token = config.github.token.is_some(),
        "Configuration loaded"
    );

    let addr = config.server.socket_addr()?;
    let state = AppState::from_config(&config).context("Failed to build application state")?;
    serve(state, addr, shutdown_signal()).await
}
