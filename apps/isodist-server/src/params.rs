//! `GET /api/` query string → [`RequestBody`].
//!
//! | Parameter     | Required | Notes                                       |
//! |---------------|----------|---------------------------------------------|
//! | `distances`   | yes      | comma separated km, e.g. `2,5,7`            |
//! | `latitude`    | yes      |                                             |
//! | `longitude`   | yes      |                                             |
//! | `hex_size`    | no       | km, `>= 0`                                  |
//! | `resolution`  | no       | km, `> 0`                                   |
//! | `deintersect` | no       | present-and-empty, `1`, `true`, `yes`, `on` |
//! | `profile`     | no       | car, motorbike, bicycle, pedestrian         |
//! | `provider`    | no       | osrm, valhalla, embedded                    |

use std::collections::HashMap;

use iso_core::{GeoPoint, OriginPoint, ProviderKind, RequestBody, RoutingProfile};

pub type Query = HashMap<String, String>;

/// Parse the query string; the error is the message for a 400 response.
pub fn parse_query(query: &Query) -> Result<RequestBody, String> {
    let raw = query
        .get("distances")
        .ok_or("Missing required parameter \"distances\".")?;
    let mut distances = Vec::new();
    for (i, part) in raw.split(',').enumerate() {
        let d: f64 = part
            .trim()
            .parse()
            .map_err(|_| format!("invalid distance[{}] => {part}", i + 1))?;
        distances.push(d);
    }

    let latitude = required_f64(query, "latitude")?;
    let longitude = required_f64(query, "longitude")?;

    let mut body = RequestBody {
        origin: Some(OriginPoint::new(GeoPoint::new(longitude, latitude))),
        ..RequestBody::default()
    };
    body.set_distances(&distances);

    if let Some(h) = optional_f64(query, "hex_size")? {
        if h < 0.0 {
            return Err(format!("Invalid \"hex_size\" value => {h}. It must not be negative."));
        }
        body.hex_size = Some(h);
    }
    if let Some(r) = optional_f64(query, "resolution")? {
        if r <= 0.0 {
            return Err(format!("Invalid \"resolution\" value => {r}. It must be greater than 0."));
        }
        body.resolution = Some(r);
    }
    if let Some(flag) = query.get("deintersect") {
        body.deintersect = Some(matches!(flag.as_str(), "" | "1" | "true" | "yes" | "on"));
    }
    if let Some(p) = query.get("profile") {
        body.profile = Some(p.parse::<RoutingProfile>().map_err(|e| e.to_string())?);
    }
    if let Some(p) = query.get("provider") {
        body.provider = Some(p.parse::<ProviderKind>().map_err(|e| e.to_string())?);
    }

    Ok(body)
}

fn required_f64(query: &Query, key: &str) -> Result<f64, String> {
    optional_f64(query, key)?.ok_or_else(|| format!("Missing required parameter \"{key}\"."))
}

fn optional_f64(query: &Query, key: &str) -> Result<Option<f64>, String> {
    match query.get(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| format!("Invalid \"{key}\" value => {raw}")),
    }
}
