use anyhow::Context as _;
use serde_json::{Value, json};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt as _, AsyncWriteExt as _, BufReader, Lines};
use tokio::process::{ChildStdin, ChildStdout, Command};

async fn send(stdin: &mut ChildStdin, msg: &Value) -> anyhow::Result<()> {
    let mut line = serde_json::to_vec(msg)?;
    line.push(b'\n');
    stdin.write_all(&line).await.context("write to server stdin")?;
    stdin.flush().await.context("flush server stdin")
}

/// Next JSON-RPC message carrying `id`, skipping notifications.
async fn reply(lines: &mut Lines<BufReader<ChildStdout>>, id: u64) -> anyhow::Result<Value> {
    let wait = async {
        while let Some(line) = lines.next_line().await? {
            let msg: Value = serde_json::from_str(&line)
                .with_context(|| format!("stdout line is not JSON: {line}"))?;
            if msg.get("id") == Some(&json!(id)) {
                return Ok(msg);
            }
        }
        anyhow::bail!("server closed stdout before answering id {id}")
    };
    tokio::time::timeout(Duration::from_secs(20), wait)
        .await
        .context("timeout waiting for stdio reply")?
}

#[tokio::test]
async fn custom_server_answers_over_stdio_by_default() -> anyhow::Result<()> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_webui-mcp-tools"))
        .env("RUST_LOG", "warn")
        .arg("custom")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .context("spawn webui-mcp-tools custom")?;

    let mut stdin = child.stdin.take().context("child stdin")?;
    let stdout = child.stdout.take().context("child stdout")?;
    let mut lines = BufReader::new(stdout).lines();

    send(&mut stdin, &json!({
        "jsonrpc": "2.0",
        "id": 0,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": { "name": "webui-mcp-tools-tests", "version": "0" }
        }
    }))
    .await?;
    let init = reply(&mut lines, 0).await?;
    assert!(init["result"]["capabilities"]["tools"].is_object(), "got: {init}");

    send(&mut stdin, &json!({ "jsonrpc": "2.0", "method": "notifications/initialized" })).await?;
    send(&mut stdin, &json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": { "name": "add", "arguments": { "a": 2, "b": 3 } }
    }))
    .await?;
    let call = reply(&mut lines, 1).await?;
    assert_eq!(call["result"]["isError"], json!(false), "got: {call}");
    assert_eq!(call["result"]["content"][0]["text"], json!("5"));

    // EOF on stdin ends the session and the process.
    drop(stdin);
    let status = tokio::time::timeout(Duration::from_secs(10), child.wait())
        .await
        .context("server did not exit after stdin closed")??;
    assert!(status.success(), "exit status: {status}");
    Ok(())
}
