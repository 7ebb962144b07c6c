//! fixture-proxy
//!
//! A development proxy that serves JSON fixtures in front of a real backend.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                 FIXTURE PROXY                │
//!   Client Request        │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   ──────────────────────┼─▶│  http   │──▶│   mock   │──▶│  forward  │──┼──▶ Backend
//!                         │  │ server  │   │intercept │   │ (upstream)│  │
//!                         │  └─────────┘   └────┬─────┘   └───────────┘  │
//!                         │                     │ hit                    │
//!   Client Response       │                     ▼                        │
//!   ◀─────────────────────┼──────────── fixture file (JSON)              │
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{builder::FalseyValueParser, ArgAction, Parser};
use tokio::net::TcpListener;

use fixture_proxy::config::{load_config, ProxyConfig};
use fixture_proxy::http::HttpServer;
use fixture_proxy::lifecycle::startup::{apply_overrides, build_interceptor, Overrides};
use fixture_proxy::lifecycle::Shutdown;
use fixture_proxy::observability;

#[derive(Parser)]
#[command(name = "fixture-proxy")]
#[command(about = "Serve local JSON fixtures in front of a development backend", long_about = None)]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable fixture interception. From the environment, `0`, `false`, `no`,
    /// `off` or an empty value disable it and anything else enables it.
    #[arg(
        long,
        env = "NETWORK_MOCK",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    mock: bool,

    /// Override `mock.fixture_root`.
    #[arg(long)]
    fixture_root: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(long)]
    bind: Option<String>,

    /// Override `upstream.address`.
    #[arg(long)]
    upstream: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    let config = apply_overrides(
        config,
        Overrides {
            bind_address: cli.bind,
            upstream: cli.upstream,
            fixture_root: cli.fixture_root,
        },
    )
    .map_err(|errors| {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        format!("invalid configuration: {joined}")
    })?;

    observability::logging::init(&config.observability);
    tracing::info!("fixture-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = ?config.upstream.address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let interceptor = Arc::new(build_interceptor(&config, cli.mock)?);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, interceptor)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
