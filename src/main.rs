use std::fs;
use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use obra_flow::api::{CalculationResponse, run_http_server};
use obra_flow::config::{LogFormat, ServerConfig};
use obra_flow::core::{ProjectConfig, calculate};

#[derive(Parser, Debug)]
#[command(
    name = "obra-flow",
    about = "Monthly debt and cash flow simulator for real-estate developments"
)]
struct Cli {
    #[arg(long, global = true, env = "OBRA_FLOW_LOG", default_value = "info")]
    log_level: String,
    #[arg(
        long,
        global = true,
        value_enum,
        env = "OBRA_FLOW_LOG_FORMAT",
        default_value_t = LogFormat::Text
    )]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API.
    Serve {
        #[arg(long, env = "OBRA_FLOW_BIND", default_value = "0.0.0.0")]
        bind: IpAddr,
        #[arg(long, env = "OBRA_FLOW_PORT", default_value_t = 8080)]
        port: u16,
    },
    /// Compute the flow and KPIs for a project JSON file and print them.
    Calculate {
        #[arg(long)]
        config: PathBuf,
        #[arg(long, default_value_t = false)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format);

    match cli.command {
        Command::Serve { bind, port } => {
            let config = ServerConfig {
                bind,
                port,
                log_level: cli.log_level,
                log_format: cli.log_format,
            };
            info!(addr = %config.socket_addr(), "starting obra-flow");
            run_http_server(&config)
                .await
                .context("HTTP server failed")?;
        }
        Command::Calculate { config, pretty } => {
            let raw = fs::read_to_string(&config)
                .with_context(|| format!("reading {}", config.display()))?;
            let project: ProjectConfig = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", config.display()))?;
            let response = CalculationResponse::from(calculate(&project)?);
            let out = if pretty {
                serde_json::to_string_pretty(&response)?
            } else {
                serde_json::to_string(&response)?
            };
            println!("{out}");
        }
    }
    Ok(())
}

fn init_logging(level: &str, format: LogFormat) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init(),
    }
}
