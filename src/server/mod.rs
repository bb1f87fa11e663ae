//! JSON-RPC server: a method dispatcher shared by an HTTP `/rpc` endpoint
//! and a WebSocket `/ws` endpoint, both built on axum.

pub mod dispatch;
mod http;

use std::net::SocketAddr;

use anyhow::{Context, Result};

use crate::command::CommandContext;
use crate::config::ServerConfig;

pub use dispatch::Dispatcher;

/// Binds and serves the JSON-RPC API until the process is asked to stop.
/// Runs `ctx`'s shutdown hooks once the listener exits, whatever the cause.
pub async fn serve(config: &ServerConfig, ctx: CommandContext) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;

    let shutdown_hooks = ctx.shutdown_hooks();
    let router = http::router(ctx, config.cors);

    log::info!("listening on http://{addr} (rpc: /rpc, websocket: /ws)");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    let result = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server loop failed");

    shutdown_hooks.run_all().await;
    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        let mut signal = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler");
        signal.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => log::info!("received Ctrl+C, shutting down"),
        _ = terminate => log::info!("received SIGTERM, shutting down"),
    }
}
