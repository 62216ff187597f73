//! Routing error type.
//!
//! Two groups share one enum.  Per-query failures (`NoRoute`,
//! `InvalidCoordinate`, `InvalidProfile`, `Network`, `Http`) are what a
//! [`Router`](crate::Router) returns for a single origin/destination pair;
//! the distance annotator turns them into "unreachable" for that point.
//! Setup failures (`Config`, `Io`, `Osm`) happen while constructing a router
//! and abort the caller.

use thiserror::Error;

use iso_core::{GeoPoint, ProviderKind, RoutingProfile};

/// Errors produced by `iso-route`.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: GeoPoint, to: GeoPoint },

    #[error("coordinate {0} is out of range")]
    InvalidCoordinate(GeoPoint),

    #[error("profile {profile} is not supported by {provider}")]
    InvalidProfile { profile: RoutingProfile, provider: ProviderKind },

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("router configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

impl RouteError {
    /// `true` for failures scoped to a single query.
    pub fn is_per_query(&self) -> bool {
        matches!(
            self,
            RouteError::NoRoute { .. }
                | RouteError::InvalidCoordinate(_)
                | RouteError::InvalidProfile { .. }
                | RouteError::Network(_)
                | RouteError::Http(_)
        )
    }
}

pub type RouteResult<T> = Result<T, RouteError>;
