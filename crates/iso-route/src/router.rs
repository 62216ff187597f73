//! The routing seam.
//!
//! The pipeline asks one question many thousands of times per request: how
//! far is this sample point from the origin over the road network?  Every
//! backend answers it through [`Router`], so the annotator never knows
//! whether the answer came from an in-process graph or an HTTP service.
//!
//! # Concurrency
//!
//! The annotator issues a whole chunk of queries at once and joins them on
//! the calling task, so `route` returns a `Send` future and implementations
//! must be `Send + Sync`: one shared, read-only handle serves every query.

use std::future::Future;

use iso_core::{GeoPoint, RoutingProfile};

use crate::RouteResult;

/// Pluggable network-distance backend.
pub trait Router: Send + Sync {
    /// Network distance in **kilometres** from `origin` to `destination`.
    ///
    /// Failures are per query; callers treat them as "unreachable".
    fn route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        profile: RoutingProfile,
    ) -> impl Future<Output = RouteResult<f64>> + Send;
}
