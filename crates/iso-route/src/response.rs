//! OSRM-format response handling shared by the HTTP routers.
//!
//! Valhalla is asked for `format: osrm`, so both services answer with the
//! same envelope:
//!
//! ```json
//! { "code": "Ok", "routes": [ { "distance": 1234.5, ... } ], ... }
//! ```
//!
//! Distances arrive in metres and leave in km.  Parsing is split from the
//! transport so it can be tested against canned bodies.

use reqwest::StatusCode;
use serde::Deserialize;

use iso_core::GeoPoint;

use crate::{RouteError, RouteResult};

#[derive(Deserialize)]
struct RouteEnvelope {
    code:    Option<String>,
    message: Option<String>,
    #[serde(default)]
    routes:  Vec<RouteSummary>,
}

#[derive(Deserialize)]
struct RouteSummary {
    distance: f64,
}

/// Valhalla's error body.
#[derive(Deserialize)]
struct ValhallaFailure {
    error_code: Option<u32>,
    error:      Option<String>,
}

/// Valhalla error codes meaning "these points are not connected".
const VALHALLA_NO_ROUTE_CODES: [u32; 3] = [171, 442, 443];

/// Reject anything but a 200 with a JSON content type.
pub fn ensure_json(status: StatusCode, content_type: Option<&str>) -> RouteResult<()> {
    if status != StatusCode::OK {
        return Err(RouteError::Network(format!("invalid status code ({status}) from server")));
    }
    match content_type {
        Some(ct) if ct.contains("application/json") => Ok(()),
        other => Err(RouteError::Network(format!(
            "invalid content type ({}) from server",
            other.unwrap_or("none")
        ))),
    }
}

/// Distance in km of the first route in an OSRM-format body.
pub fn parse_route_distance(body: &str, from: GeoPoint, to: GeoPoint) -> RouteResult<f64> {
    let envelope: RouteEnvelope = serde_json::from_str(body)
        .map_err(|e| RouteError::Network(format!("malformed route response: {e}")))?;

    match envelope.code.as_deref() {
        None | Some("Ok") => {}
        Some("NoRoute") | Some("NoSegment") => return Err(RouteError::NoRoute { from, to }),
        Some(code) => {
            return Err(RouteError::Network(format!(
                "{code}: {}",
                envelope.message.unwrap_or_default()
            )));
        }
    }

    let first = envelope.routes.first().ok_or(RouteError::NoRoute { from, to })?;
    if !(first.distance.is_finite() && first.distance >= 0.0) {
        return Err(RouteError::Network(format!("invalid route distance {}", first.distance)));
    }
    Ok(first.distance * 0.001)
}

/// Classify a non-200 Valhalla answer.
pub fn valhalla_failure(status: StatusCode, body: &str, from: GeoPoint, to: GeoPoint) -> RouteError {
    match serde_json::from_str::<ValhallaFailure>(body) {
        Ok(ValhallaFailure { error_code: Some(code), .. })
            if VALHALLA_NO_ROUTE_CODES.contains(&code) =>
        {
            RouteError::NoRoute { from, to }
        }
        Ok(ValhallaFailure { error_code, error }) => RouteError::Network(format!(
            "valhalla error {} ({status}): {}",
            error_code.map_or_else(|| "?".to_string(), |c| c.to_string()),
            error.unwrap_or_default()
        )),
        Err(_) => RouteError::Network(format!("invalid status code ({status}) from server")),
    }
}
