use tracing::{info, warn};

/// Resolve on SIGINT or SIGTERM
pub async fn shutdown_signal() {
    use tokio::signal;

    #[cfg(unix)]
    {
        let sigterm = signal::unix::signal(signal::unix::SignalKind::terminate());
        let sigint = signal::unix::signal(signal::unix::SignalKind::interrupt());

        match (sigterm, sigint) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM"),
                    _ = sigint.recv() => info!("Received SIGINT"),
                }
            }
            _ => {
                warn!("Unix signal handlers unavailable, falling back to Ctrl+C");
                ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    ctrl_c().await;
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C"),
        Err(e) => warn!(error = %e, "Failed to listen for Ctrl+C"),
    }
}
