use anyhow::Context as _;
use std::process::{Child, Command};
use std::time::Duration;

pub use webui_test_support::{KillOnDrop, pick_unused_port, serve_mock};

/// Spawn `webui-mcp-tools <server> --transport http` on a free port and wait for `/health`.
///
/// `extra` is appended after the subcommand (e.g. `--base-url ...`).
pub async fn start_http_server(server: &str, extra: &[&str]) -> anyhow::Result<(String, KillOnDrop)> {
    let port = pick_unused_port()?;
    let child = spawn_tools(server, port, extra)?;
    let child = KillOnDrop(child);

    let base_url = format!("http://127.0.0.1:{port}");
    webui_test_support::wait_http_ok(&format!("{base_url}/health"), Duration::from_secs(20))
        .await?;
    Ok((base_url, child))
}

fn spawn_tools(server: &str, port: u16, extra: &[&str]) -> anyhow::Result<Child> {
    let bin = env!("CARGO_BIN_EXE_webui-mcp-tools");
    Command::new(bin)
        .arg("--log-level")
        .arg("info")
        .arg(server)
        .arg("--transport")
        .arg("http")
        .arg("--bind")
        .arg(format!("127.0.0.1:{port}"))
        .args(extra)
        .spawn()
        .with_context(|| format!("spawn webui-mcp-tools {server}"))
}
