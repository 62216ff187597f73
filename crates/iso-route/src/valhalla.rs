//! Valhalla `/route` action client.
//!
//! Each query POSTs two `break` locations with the profile's costing model
//! and asks for kilometres in OSRM format, so the answer goes through the
//! same parser as OSRM's.

use std::time::Duration;

use reqwest::Client;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use iso_core::{GeoPoint, RoutingProfile};

use crate::response::{ensure_json, parse_route_distance, valhalla_failure};
use crate::{RouteError, RouteResult, Router};

// ── Request body ──────────────────────────────────────────────────────────────

#[derive(Serialize, Debug, PartialEq)]
pub struct ValhallaRequest {
    pub locations:          [ValhallaLocation; 2],
    pub costing:            &'static str,
    pub directions_options: DirectionsOptions,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct ValhallaLocation {
    pub lat:  f64,
    pub lon:  f64,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct DirectionsOptions {
    pub units:  &'static str,
    pub format: &'static str,
}

impl ValhallaRequest {
    pub fn new(origin: GeoPoint, destination: GeoPoint, profile: RoutingProfile) -> Self {
        let location = |p: GeoPoint| ValhallaLocation { lat: p.lat, lon: p.lon, kind: "break" };
        Self {
            locations: [location(origin), location(destination)],
            costing: ValhallaRouter::costing(profile),
            directions_options: DirectionsOptions { units: "kilometers", format: "osrm" },
        }
    }
}

// ── ValhallaRouter ────────────────────────────────────────────────────────────

pub struct ValhallaRouter {
    client:   Client,
    endpoint: String,
}

impl ValhallaRouter {
    /// `endpoint` is the full action URL, e.g. `http://127.0.0.1:8002/route`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> RouteResult<Self> {
        let endpoint = endpoint.into();
        if endpoint.is_empty() {
            return Err(RouteError::Config("Valhalla endpoint is empty".into()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Valhalla costing model for `profile`.
    pub fn costing(profile: RoutingProfile) -> &'static str {
        match profile {
            RoutingProfile::Car        => "auto",
            RoutingProfile::Motorbike  => "motorcycle",
            RoutingProfile::Bicycle    => "bicycle",
            RoutingProfile::Pedestrian => "pedestrian",
        }
    }
}

impl Router for ValhallaRouter {
    async fn route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        profile: RoutingProfile,
    ) -> RouteResult<f64> {
        for p in [origin, destination] {
            if !p.is_routable() {
                return Err(RouteError::InvalidCoordinate(p));
            }
        }

        let request = ValhallaRequest::new(origin, destination, profile);
        let resp = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = resp.text().await?;

        if status != StatusCode::OK {
            return Err(valhalla_failure(status, &body, origin, destination));
        }
        ensure_json(status, content_type.as_deref())?;
        parse_route_distance(&body, origin, destination)
    }
}
