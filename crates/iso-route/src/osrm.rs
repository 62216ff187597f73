//! OSRM `route` service client.
//!
//! ```text
//! GET {endpoint}{profile}/{lon},{lat};{lon},{lat}?overview=false
//! ```
//!
//! OSRM exposes one graph per profile; the standard builds are `car`,
//! `bicycle` and `foot`.  Motorbike has no OSRM profile and is rejected per
//! query with [`RouteError::InvalidProfile`].

use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

use iso_core::{GeoPoint, ProviderKind, RoutingProfile};

use crate::response::{ensure_json, parse_route_distance};
use crate::{RouteError, RouteResult, Router};

pub struct OsrmRouter {
    client:   Client,
    endpoint: String,
}

impl OsrmRouter {
    /// `endpoint` is the service base, e.g. `http://127.0.0.1:5000/route/v1/`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> RouteResult<Self> {
        let mut endpoint = endpoint.into();
        if endpoint.is_empty() {
            return Err(RouteError::Config("OSRM endpoint is empty".into()));
        }
        if !endpoint.ends_with('/') {
            endpoint.push('/');
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// OSRM profile path segment for `profile`.
    pub fn profile_segment(profile: RoutingProfile) -> RouteResult<&'static str> {
        match profile {
            RoutingProfile::Car        => Ok("car"),
            RoutingProfile::Bicycle    => Ok("bicycle"),
            RoutingProfile::Pedestrian => Ok("foot"),
            RoutingProfile::Motorbike  => Err(RouteError::InvalidProfile {
                profile,
                provider: ProviderKind::Osrm,
            }),
        }
    }

    /// Full request URL for one origin/destination pair.
    pub fn route_url(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        profile: RoutingProfile,
    ) -> RouteResult<String> {
        for p in [origin, destination] {
            if !p.is_routable() {
                return Err(RouteError::InvalidCoordinate(p));
            }
        }
        let segment = Self::profile_segment(profile)?;
        Ok(format!(
            "{}{}/{},{};{},{}",
            self.endpoint, segment, origin.lon, origin.lat, destination.lon, destination.lat
        ))
    }
}

impl Router for OsrmRouter {
    async fn route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        profile: RoutingProfile,
    ) -> RouteResult<f64> {
        let url = self.route_url(origin, destination, profile)?;

        let resp = self
            .client
            .get(&url)
            .query(&[("overview", "false")])
            .send()
            .await?;

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        ensure_json(resp.status(), content_type.as_deref())?;

        let body = resp.text().await?;
        parse_route_distance(&body, origin, destination)
    }
}
