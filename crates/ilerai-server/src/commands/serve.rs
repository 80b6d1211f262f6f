use anyhow::{Context, Result};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use ilerai_server::{Runtime, router};

pub async fn run(runtime: Runtime) -> Result<()> {
    let addr: SocketAddr = runtime
        .config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}'", runtime.config.server.bind_addr))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("IlerAI USSD endpoint listening on http://{}", addr);

    axum::serve(listener, router(runtime.engine).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
    }
}
