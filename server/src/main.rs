//! JSON content editor server
//!
//! Hosts the JSON editor of content records over HTTP, backed by an
//! in-memory record store seeded from the configuration.
//!
//! Usage:
//!   jsonedit-server --config jsonedit.toml --port 5080
//!
//! Without `--config` the server starts empty and serves the default user
//! `admin` with publish rights.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use anyhow::{Context, Result};
use clap::Parser;
use jsonedit_server::{build_router, config::ServerConfig, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "jsonedit-server")]
#[command(about = "JSON editor for content records")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on, overriding the configured address
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .compact()
        .init();

    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(port) = args.port {
        config.listen = SocketAddr::new(config.listen.ip(), port);
    }

    let state = AppState::from_config(&config)
        .await
        .context("Failed to initialize editor")?;
    let app = build_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen))?;
    info!(
        "JSON editor listening on http://{}{}",
        listener.local_addr()?,
        config.admin_prefix
    );
    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}
