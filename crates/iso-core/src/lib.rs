//! `iso-core` — foundational types for the isodist workspace.
//!
//! This crate is a dependency of every other `iso-*` crate.  It has no
//! `iso-*` dependencies and keeps its external ones small (`geo-types` for
//! the ring geometry, `serde`/`serde_json` for requests and ring properties,
//! `thiserror`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`geo`]       | `GeoPoint`, `BoundingBox`, haversine + destination        |
//! | [`profile`]   | `RoutingProfile` enum                                     |
//! | [`config`]    | `IsoConfig`, `ProviderKind`, `ProviderConfig`             |
//! | [`ring`]      | `Ring`, `RingSet`, `DistanceMetadata`, `Properties`       |
//! | [`request`]   | `RequestBody` — the JSON request shared by CLI and server |
//! | [`error`]     | `CoreError`, `CoreResult`                                 |

pub mod config;
pub mod error;
pub mod geo;
pub mod profile;
pub mod request;
pub mod ring;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{IsoConfig, ProviderConfig, ProviderKind};
pub use error::{CoreError, CoreResult};
pub use geo::{BoundingBox, GeoPoint};
pub use profile::RoutingProfile;
pub use request::{DistanceEntry, OriginPoint, RequestBody};
pub use ring::{DistanceMetadata, Properties, Ring, RingSet};
