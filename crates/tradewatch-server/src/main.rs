//! Tradewatch server - HTTP dashboard over the conversation analysis service.

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tradewatch_server::{config::Config, logging, router, state::AppState};

use logging::{LogConfig, LogFormat};

/// Tradewatch server - operator dashboard for conversation analysis.
#[derive(Parser, Debug)]
#[command(name = "tradewatch-server")]
#[command(about = "HTTP dashboard server for the conversation analysis service")]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override port from config
    #[arg(short, long)]
    port: Option<u16>,

    /// Override upstream analysis service URL
    #[arg(long, value_name = "URL")]
    upstream: Option<String>,

    /// Enable verbose logging (INFO level for most targets)
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging (DEBUG level)
    #[arg(short, long)]
    debug: bool,

    /// Enable trace logging (TRACE level for everything)
    #[arg(long)]
    trace: bool,

    /// Quiet mode (WARN and ERROR only)
    #[arg(short, long)]
    quiet: bool,

    /// Set log level for specific targets (e.g., "dashboard=debug" or "upstream=trace")
    /// Can be specified multiple times. Targets are prefixed with "tradewatch::" automatically.
    #[arg(long = "log", value_name = "TARGET=LEVEL")]
    log_overrides: Vec<String>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", default_value = "text")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig::from_cli(
        cli.verbose,
        cli.debug,
        cli.trace,
        cli.quiet,
        cli.log_overrides,
        cli.log_format,
    );
    logging::init(&log_config);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(upstream) = cli.upstream {
        config.upstream_url = upstream;
    }

    tracing::info!(
        target: "tradewatch::startup",
        "Loaded configuration (port: {}, upstream: {})",
        config.port,
        config.upstream_url
    );

    let state = Arc::new(AppState::new(config.clone()));
    tracing::info!(target: "tradewatch::startup", "Initialized application state");

    let app = router::build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!(target: "tradewatch::startup", "Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
