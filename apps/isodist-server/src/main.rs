//! `isodist-server` — HTTP API for isodistance polygons.
//!
//! Run with:
//!   PORT=3456 cargo run -p isodist-server --release -- \
//!     --osrm-endpoint http://127.0.0.1:5000/route/v1/
//!
//! See [`api`] for the routes.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod api;
mod params;


use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use iso_core::config::{DEFAULT_OSRM_ENDPOINT, DEFAULT_TIMEOUT_SECS, DEFAULT_VALHALLA_ENDPOINT};
use iso_core::ProviderConfig;

const DEFAULT_PORT: u16 = 3456;

#[derive(Parser)]
#[command(name = "isodist-server")]
#[command(version, about = "HTTP API for isodistance polygons", long_about = None)]
struct Args {
    /// OSRM route service base URL
    #[arg(long, default_value = DEFAULT_OSRM_ENDPOINT)]
    osrm_endpoint: String,

    /// Valhalla route action URL
    #[arg(long, default_value = DEFAULT_VALHALLA_ENDPOINT)]
    valhalla_endpoint: String,

    /// OSM PBF extract; enables the embedded provider
    #[arg(long)]
    network: Option<PathBuf>,

    /// Per-request timeout for routing services, seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let providers = ProviderConfig {
        osrm_endpoint:     args.osrm_endpoint,
        valhalla_endpoint: args.valhalla_endpoint,
        network_path:      args.network,
        timeout_secs:      args.timeout_secs,
    };
    let state = api::AppState::from_config(&providers).context("configuring routing providers")?;

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("binding port {port}"))?;

    tracing::info!(port, "isodist server listening");
    axum::serve(listener, api::build_router(Arc::new(state))).await?;
    Ok(())
}
