//! Backend selection.
//!
//! The provider is picked once per request from [`ProviderKind`] and the
//! matching [`ProviderConfig`] entry.  [`AnyRouter`] keeps the choice as a
//! plain enum so the pipeline stays generic over a single concrete `Router`
//! type without boxing futures.

use std::sync::Arc;
use std::time::Duration;

use iso_core::{GeoPoint, ProviderConfig, ProviderKind, RoutingProfile};

use crate::{EmbeddedRouter, OsrmRouter, RouteError, RouteResult, Router, ValhallaRouter};

pub enum AnyRouter {
    /// Shared so one loaded network can back many requests.
    Embedded(Arc<EmbeddedRouter>),
    Osrm(OsrmRouter),
    Valhalla(ValhallaRouter),
}

impl AnyRouter {
    /// Build the HTTP router for `kind`.  The embedded router needs a loaded
    /// network; pass it as `embedded`, or see [`AnyRouter::load_embedded`].
    pub fn from_config(
        kind: ProviderKind,
        config: &ProviderConfig,
        embedded: Option<Arc<EmbeddedRouter>>,
    ) -> RouteResult<Self> {
        let timeout = Duration::from_secs(config.timeout_secs.max(1));
        match kind {
            ProviderKind::Osrm => Ok(AnyRouter::Osrm(OsrmRouter::new(&config.osrm_endpoint, timeout)?)),
            ProviderKind::Valhalla => Ok(AnyRouter::Valhalla(ValhallaRouter::new(
                &config.valhalla_endpoint,
                timeout,
            )?)),
            ProviderKind::Embedded => embedded.map(AnyRouter::Embedded).ok_or_else(|| {
                RouteError::Config("embedded provider selected but no road network is loaded".into())
            }),
        }
    }

    /// Load the network at `config.network_path` into an embedded router.
    #[cfg(feature = "osm")]
    pub fn load_embedded(config: &ProviderConfig) -> RouteResult<Arc<EmbeddedRouter>> {
        let path = config
            .network_path
            .as_deref()
            .ok_or_else(|| RouteError::Config("no road network path configured".into()))?;
        let network = crate::osm::load_from_pbf(path)?;
        tracing::info!(
            path = %path.display(),
            nodes = network.node_count(),
            edges = network.edge_count(),
            "loaded road network"
        );
        Ok(Arc::new(EmbeddedRouter::new(network)))
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            AnyRouter::Embedded(_) => ProviderKind::Embedded,
            AnyRouter::Osrm(_)     => ProviderKind::Osrm,
            AnyRouter::Valhalla(_) => ProviderKind::Valhalla,
        }
    }
}

impl Router for AnyRouter {
    async fn route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        profile: RoutingProfile,
    ) -> RouteResult<f64> {
        match self {
            AnyRouter::Embedded(r) => r.route(origin, destination, profile).await,
            AnyRouter::Osrm(r)     => r.route(origin, destination, profile).await,
            AnyRouter::Valhalla(r) => r.route(origin, destination, profile).await,
        }
    }
}
