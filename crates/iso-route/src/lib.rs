//! `iso-route` — network distances from an origin to sample points.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`router`]    | `Router` trait                                            |
//! | [`network`]   | `RoadNetwork` (CSR + R-tree), `RoadNetworkBuilder`, access|
//! | [`embedded`]  | `EmbeddedRouter`: in-process Dijkstra                     |
//! | [`osrm`]      | `OsrmRouter`: OSRM HTTP `route` service                   |
//! | [`valhalla`]  | `ValhallaRouter`: Valhalla HTTP `route` action            |
//! | [`response`]  | OSRM-format response parsing shared by both HTTP routers  |
//! | [`provider`]  | `AnyRouter`: the backend chosen at configuration time     |
//! | [`osm`]       | `load_from_pbf` (feature = `"osm"` only)                  |
//! | [`error`]     | `RouteError`, `RouteResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag  | Effect                                                         |
//! |-------|----------------------------------------------------------------|
//! | `osm` | Enables OSM PBF loading via the `osmpbf` crate.                |

pub mod embedded;
pub mod error;
pub mod ids;
pub mod network;
pub mod osrm;
pub mod provider;
pub mod response;
pub mod router;
pub mod valhalla;

#[cfg(feature = "osm")]
pub mod osm;

#[cfg(test)]
mod tests;

pub use embedded::{EmbeddedRouter, TREE_CACHE_CAPACITY};
pub use error::{RouteError, RouteResult};
pub use ids::{EdgeId, NodeId};
pub use network::{AccessMask, RoadNetwork, RoadNetworkBuilder};
pub use osrm::OsrmRouter;
pub use provider::AnyRouter;
pub use router::Router;
pub use valhalla::ValhallaRouter;
