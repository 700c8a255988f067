use anyhow::Context;
use petlogix_api::config::ApiConfig;
use petlogix_api::middleware::observability::init_tracing;
use petlogix_api::routes;
use std::net::SocketAddr;
use tracing::{error, info};

// Panic hook to catch and log panics
fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|panic_info| {
        let message = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_default();
        error!(%location, "PANIC occurred: {}", message);
    }));
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env().context("Invalid configuration")?;

    init_tracing(config.log_format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;
    setup_panic_hook();
    info!("Application starting...");

    let port = config.port;
    let app_state = routes::create_app_state_with_storage(config)
        .await
        .context("Failed to initialize storage")?;
    let storage = app_state.storage().clone();
    info!("Storage backend: {}", storage.backend_name());

    let app = routes::create_app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind listener on {}", addr))?;
    info!("Server listening on {} (port {})", addr, port);
    info!("Health check available at http://{}/health", addr);

    // Handle both SIGINT (Ctrl+C) and SIGTERM (Docker stop)
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    storage.close().await;
    info!("Server shutdown complete");

    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to install SIGTERM handler: {}", e);
            let _ = tokio::signal::ctrl_c().await;
            info!("SIGINT received, shutting down gracefully");
            return;
        }
    };
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("SIGINT received, shutting down gracefully");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received, shutting down gracefully");
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for CTRL+C: {}", e);
    }
    info!("Shutdown signal received");
}
