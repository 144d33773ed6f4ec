//! `webui-mcp-tools`: run one of the demo MCP servers.

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::net::SocketAddr;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use webui_mcp_tools::covid::{self, CovidQueries, CovidStore};
use webui_mcp_tools::server::{CovidServer, CustomServer, WeatherServer};
use webui_mcp_tools::transport::{Transport, serve};
use webui_mcp_tools::weather::{DEFAULT_WEATHER_BASE_URL, WeatherClient};

#[derive(Debug, Parser)]
#[command(name = "webui-mcp-tools", version, about = "Demo MCP tool servers")]
struct Cli {
    #[arg(long, default_value = "info")]
    log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// hello / add / uppercase
    Custom(ServeArgs),
    /// get_weather
    Weather {
        #[command(flatten)]
        serve: ServeArgs,
        /// Open-Meteo compatible forecast endpoint.
        #[arg(long, env = "WEATHER_BASE_URL", default_value = DEFAULT_WEATHER_BASE_URL)]
        base_url: String,
    },
    /// COVID-19 queries against Postgres
    Covid {
        #[command(flatten)]
        serve: ServeArgs,
        #[command(flatten)]
        database: DatabaseArgs,
    },
    /// Run every COVID tool once and report whether the database answers.
    CovidCheck {
        #[command(flatten)]
        database: DatabaseArgs,
        /// Only list the table's columns.
        #[arg(long)]
        schema_only: bool,
    },
}

#[derive(Debug, Args)]
struct ServeArgs {
    #[arg(long, value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// Listen address for `--transport http`.
    #[arg(long, default_value = "127.0.0.1:8000")]
    bind: SocketAddr,
}

#[derive(Debug, Args)]
struct DatabaseArgs {
    #[arg(long, env = "DATABASE_URI", default_value = covid::DEFAULT_DATABASE_URI)]
    database_uri: String,
}

impl DatabaseArgs {
    fn queries(&self) -> CovidQueries {
        CovidQueries::new(CovidStore::new(self.database_uri.clone()))
    }
}

fn init_tracing(level: &str, format: LogFormat) {
    // stdout carries the stdio transport; logs always go to stderr.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn shutdown_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            return;
        }
        trigger.cancel();
    });
    token
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format);

    match cli.command {
        Command::Custom(args) => {
            serve(
                CustomServer::new,
                args.transport,
                args.bind,
                shutdown_on_ctrl_c(),
            )
            .await?;
        }
        Command::Weather { serve: args, base_url } => {
            let client = WeatherClient::new(base_url).context("build weather HTTP client")?;
            serve(
                move || WeatherServer::new(client.clone()),
                args.transport,
                args.bind,
                shutdown_on_ctrl_c(),
            )
            .await?;
        }
        Command::Covid {
            serve: args,
            database,
        } => {
            let queries = database.queries();
            serve(
                move || CovidServer::new(queries.clone()),
                args.transport,
                args.bind,
                shutdown_on_ctrl_c(),
            )
            .await?;
        }
        Command::CovidCheck {
            database,
            schema_only,
        } => {
            let queries = database.queries();
            if schema_only {
                let columns = queries.columns().await;
                println!("world 資料表欄位清單：\n");
                println!("{columns}");
                return Ok(ExitCode::SUCCESS);
            }

            let results = covid::check::run_checks(&queries).await;
            let all_ok = covid::check::write_report(&mut std::io::stdout().lock(), &results)
                .context("write check report")?;
            if !all_ok {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
