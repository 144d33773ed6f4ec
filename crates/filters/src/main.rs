//! `webui-filter`: run the configured filter pipeline on one envelope.
//!
//! Reads an envelope as JSON (file or stdin), runs `inlet` or `outlet`, prints the resulting
//! envelope on stdout. A rejection is printed on stderr as `{"detail": ...}` and exits with
//! status 2; any other failure exits with status 1.

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use webui_filters::{Envelope, FilterError, FilterPipeline, FiltersConfig, UserContext};

const REJECTED_EXIT: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "webui-filter", version, about = "Run chat gateway filters on an envelope")]
struct Cli {
    /// Filters config (YAML or JSON). Without it, the debug and turn-limit filters run.
    #[arg(long, env = "WEBUI_FILTERS_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    stage: Stage,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Stage {
    /// Process an inbound request.
    Inlet(StageArgs),
    /// Process an outbound response.
    Outlet(StageArgs),
}

#[derive(Debug, clap::Args)]
struct StageArgs {
    /// Envelope JSON file; `-` reads stdin.
    #[arg(long, default_value = "-")]
    body: PathBuf,

    /// User context JSON file.
    #[arg(long)]
    user: Option<PathBuf>,
}

fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn read_json_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("read envelope from stdin")?;
        return Ok(buf);
    }
    std::fs::read(path).with_context(|| format!("read {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format);

    let config = match &cli.config {
        Some(path) => webui_filters::load_config(path)
            .with_context(|| format!("load filters config {}", path.display()))?,
        None => FiltersConfig::builtin(),
    };
    let pipeline = FilterPipeline::from_config(&config).context("build filter pipeline")?;
    tracing::debug!(filters = ?pipeline.names(), "pipeline ready");

    let (Stage::Inlet(args) | Stage::Outlet(args)) = &cli.stage;
    let body: Envelope =
        serde_json::from_slice(&read_json_input(&args.body)?).context("parse envelope JSON")?;
    let user: Option<UserContext> = match &args.user {
        Some(path) => Some(
            serde_json::from_slice(&read_json_input(path)?).context("parse user context JSON")?,
        ),
        None => None,
    };

    let out = match &cli.stage {
        Stage::Inlet(_) => match pipeline.inlet(body, user.as_ref()).await {
            Ok(out) => out,
            Err(FilterError::Rejected { filter, reason }) => {
                tracing::warn!(filter = %filter, reason = %reason, "request rejected");
                eprintln!("{}", serde_json::json!({ "detail": reason }));
                return Ok(ExitCode::from(REJECTED_EXIT));
            }
            Err(e) => return Err(e).context("inlet"),
        },
        Stage::Outlet(_) => pipeline.outlet(body, user.as_ref()).await,
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&out).context("serialize envelope")?
    );
    Ok(ExitCode::SUCCESS)
}
