//! ennode-web - Visual Ennode site backend
//!
//! Resolves configuration, builds the backend client, and serves the page
//! loader API over HTTP.

use anyhow::Result;
use clap::Parser;
use ennode_common::config::{ConfigOverrides, SiteConfig};
use std::path::PathBuf;
use tracing::info;

use ennode_web::{build_router, AppState};

#[derive(Debug, Parser)]
#[command(name = "ennode-web", version, about = "Visual Ennode site backend")]
struct Args {
    /// TOML config file
    #[arg(long, env = "ENNODE_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:3000
    #[arg(long)]
    bind: Option<String>,

    /// Base URL of the content API
    #[arg(long)]
    base_api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Build identification first, before any config or network delays
    info!(
        "Starting Visual Ennode site backend (ennode-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let overrides = ConfigOverrides {
        config_path: args.config,
        bind_addr: args.bind,
        base_api_url: args.base_api_url,
    };
    let config = SiteConfig::resolve(&overrides)?;

    info!("Content API: {}", config.base_api_url);
    info!(
        "Default locale: {}, {} title aliases loaded",
        config.default_locale,
        config.title_aliases.len()
    );

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("ennode-web listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
