//! Helpers shared by the workspace's integration tests.

use anyhow::Context as _;
use std::net::TcpListener;
use std::process::Child;
use std::time::{Duration, Instant};

pub struct KillOnDrop(pub Child);

impl Drop for KillOnDrop {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

/// Pick an unused TCP port on localhost.
///
/// Note: this does not reserve the port; it's still possible for another process to bind it
/// before you do.
///
/// # Errors
///
/// Returns an error if binding an ephemeral localhost port fails or if the bound socket's
/// local address cannot be read.
pub fn pick_unused_port() -> anyhow::Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0").context("bind ephemeral port")?;
    Ok(listener.local_addr()?.port())
}

/// Poll an HTTP URL until it returns a success status (2xx/3xx).
///
/// # Errors
///
/// Returns an error if the timeout elapses before the endpoint returns a success status.
pub async fn wait_http_ok(url: &str, timeout_dur: Duration) -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > timeout_dur {
            anyhow::bail!("timed out waiting for {url}");
        }

        match client.get(url).send().await {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => tokio::time::sleep(Duration::from_millis(200)).await,
        }
    }
}

/// Poll Postgres until a connection succeeds.
///
/// # Errors
///
/// Returns an error if no connection succeeds before `timeout_dur` elapses.
pub async fn wait_pg_ready(database_url: &str, timeout_dur: Duration) -> anyhow::Result<()> {
    use sqlx::Connection as _;

    let start = Instant::now();
    loop {
        if start.elapsed() > timeout_dur {
            anyhow::bail!("timed out waiting for Postgres");
        }

        if let Ok(conn) = sqlx::PgConnection::connect(database_url).await {
            let _ = conn.close().await;
            return Ok(());
        }

        tokio::time::sleep(Duration::from_millis(200)).await;
    }
}

/// Serve `router` on an ephemeral localhost port for the lifetime of the returned handle.
///
/// Returns the base URL (`http://127.0.0.1:<port>`).
///
/// # Errors
///
/// Returns an error if the listener cannot be bound.
pub async fn serve_mock(
    router: axum::Router,
) -> anyhow::Result<(String, tokio::task::JoinHandle<()>)> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("bind mock server")?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("mock server stopped: {e}");
        }
    });
    Ok((format!("http://{addr}"), handle))
}
