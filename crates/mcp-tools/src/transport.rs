//! Serving a handler over stdio or MCP streamable HTTP.

use anyhow::Context as _;
use axum::Router;
use axum::routing::get;
use clap::ValueEnum;
use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use rmcp::{ServerHandler, ServiceExt as _};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// One client over stdin/stdout (what mcpo and most hosts spawn).
    Stdio,
    /// Streamable HTTP at `/mcp`, health at `/health`.
    Http,
}

async fn health() -> &'static str {
    "ok"
}

/// Run `make_handler`'s server until the client goes away or `shutdown` fires.
///
/// Over HTTP each MCP session gets a fresh handler from `make_handler`.
pub async fn serve<S, F>(
    make_handler: F,
    transport: Transport,
    bind: SocketAddr,
    shutdown: CancellationToken,
) -> anyhow::Result<()>
where
    S: ServerHandler,
    F: Fn() -> S + Send + Sync + 'static,
{
    match transport {
        Transport::Stdio => serve_stdio(make_handler(), shutdown).await,
        Transport::Http => serve_http(make_handler, bind, shutdown).await,
    }
}

async fn serve_stdio<S: ServerHandler>(
    handler: S,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let running = handler
        .serve(rmcp::transport::stdio())
        .await
        .context("start stdio MCP server")?;
    tracing::info!("serving MCP over stdio");

    tokio::select! {
        res = running.waiting() => {
            let reason = res.context("stdio MCP server task failed")?;
            tracing::info!(?reason, "stdio MCP server stopped");
        }
        () = shutdown.cancelled() => {
            tracing::info!("shutdown requested");
        }
    }
    Ok(())
}

async fn serve_http<S, F>(
    make_handler: F,
    bind: SocketAddr,
    shutdown: CancellationToken,
) -> anyhow::Result<()>
where
    S: ServerHandler,
    F: Fn() -> S + Send + Sync + 'static,
{
    let mcp = StreamableHttpService::new(
        move || Ok(make_handler()),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig::default(),
    );
    let app = Router::new()
        .route("/health", get(health))
        .nest_service("/mcp", mcp);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("bind {bind}"))?;
    tracing::info!(addr = %listener.local_addr()?, "serving MCP over streamable HTTP at /mcp");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("HTTP server failed")
}
