//! `isodist` — isodistance polygons as a GeoJSON FeatureCollection on stdout.
//!
//! Options come from an optional JSON request on stdin (see
//! `iso_core::RequestBody`) and from flags, flags winning:
//!
//!   echo '{"distances":[{"distance":2},{"distance":5}]}' \
//!     | isodist --lon 9.86557 --lat 52.3703 -r 0.1 -x 0.5
//!
//!   isodist --lon 9.86557 --lat 52.3703 -d 2 -d 5 -d 7 --provider valhalla
//!
//! Exit code 1 on failure.  Request errors print one line; anything else
//! prints the full error chain.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use iso_core::{
    CoreError, DistanceMetadata, GeoPoint, IsoConfig, OriginPoint, ProviderConfig, ProviderKind,
    RequestBody, RoutingProfile,
};
use iso_output::{write_geojson, GridCsvWriter};
use iso_pipeline::{Isodist, PipelineError, TracingObserver};
use iso_route::AnyRouter;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "isodist")]
#[command(version, about = "Compute isodistance polygons around a point", long_about = None)]
struct Cli {
    /// Origin longitude
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Origin latitude
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Distance in km to compute a polygon for (repeatable)
    #[arg(short, long = "distance")]
    distances: Vec<f64>,

    /// Sampling resolution of the point grid, km
    #[arg(short, long)]
    resolution: Option<f64>,

    /// Hex cell side in km; 0 disables hex fitting
    #[arg(short = 'x', long)]
    hex_size: Option<f64>,

    /// Routing profile: car, motorbike, bicycle, pedestrian
    #[arg(short, long)]
    profile: Option<RoutingProfile>,

    /// Routing provider: osrm, valhalla, embedded
    #[arg(long)]
    provider: Option<ProviderKind>,

    /// HTTP endpoint of the routing provider
    #[arg(long)]
    endpoint: Option<String>,

    /// OSM PBF extract for the embedded provider
    #[arg(long)]
    network: Option<PathBuf>,

    /// Turn nested polygons into disjoint bands
    #[arg(long)]
    deintersect: bool,

    /// Also write the annotated sample grid to this CSV file
    #[arg(long)]
    grid_csv: Option<PathBuf>,

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
        .with_writer(io::stderr)
        .init();
}

/// The request on stdin, or an empty one when stdin is a terminal or empty.
fn read_request() -> Result<RequestBody> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(RequestBody::default());
    }
    let mut raw = String::new();
    stdin.read_to_string(&mut raw).context("reading stdin")?;
    if raw.trim().is_empty() {
        return Ok(RequestBody::default());
    }
    serde_json::from_str(&raw).context("parsing the JSON request on stdin")
}

// ── Main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_known(&e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e:?}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut request = read_request()?;

    if let (Some(lon), Some(lat)) = (cli.lon, cli.lat) {
        request.origin = Some(OriginPoint::new(GeoPoint::new(lon, lat)));
    }
    let Some(origin) = request.origin() else {
        return Err(CoreError::validation("could not determine origin location").into());
    };

    if !cli.distances.is_empty() {
        request.set_distances(&cli.distances);
    }
    let distances = request.distances();
    if distances.is_empty() {
        return Err(CoreError::validation("could not determine isodistance distances").into());
    }
    let metadata: DistanceMetadata = request.metadata();

    let mut config = IsoConfig::default();
    request.apply_to(&mut config);
    if let Some(r) = cli.resolution {
        config.resolution = r;
    }
    if let Some(h) = cli.hex_size {
        config.hex_size = h;
    }
    if let Some(p) = cli.profile {
        config.profile = p;
    }
    if let Some(p) = cli.provider {
        config.provider = p;
    }
    config.deintersect |= cli.deintersect;

    let mut providers = ProviderConfig { network_path: cli.network, ..ProviderConfig::default() };
    if let Some(endpoint) = cli.endpoint {
        providers.set_endpoint(config.provider, endpoint);
    }

    let embedded = match config.provider {
        ProviderKind::Embedded => Some(AnyRouter::load_embedded(&providers)?),
        _ => None,
    };
    let router = AnyRouter::from_config(config.provider, &providers, embedded)?;

    tracing::info!(
        %origin,
        ?distances,
        resolution = config.resolution,
        hex_size = config.hex_size,
        profile = %config.profile,
        provider = %router.kind(),
        "computing isodistances"
    );

    let (rings, grid) = Isodist::new(config, &router)
        .compute_with_grid(origin, &distances, &metadata, &mut TracingObserver)
        .await?;

    if let Some(path) = cli.grid_csv {
        let mut writer = GridCsvWriter::create(&path)
            .with_context(|| format!("creating {}", path.display()))?;
        writer.write_grid(&grid)?;
        writer.finish()?;
    }

    write_geojson(io::stdout().lock(), &rings)?;
    Ok(())
}

/// Request problems the user can fix; reported without a backtrace.
fn is_known(err: &anyhow::Error) -> bool {
    if let Some(e) = err.downcast_ref::<PipelineError>() {
        return e.is_known();
    }
    matches!(err.downcast_ref::<CoreError>(), Some(CoreError::Validation(_) | CoreError::Parse(_)))
}
