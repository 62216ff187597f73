//! JSON request body shared by the CLI (stdin) and the HTTP server (POST).
//!
//! ```json
//! {
//!   "origin": { "type": "Point", "coordinates": [9.86557, 52.3703] },
//!   "distances": [ { "distance": 2, "label": "short" }, { "distance": 5 } ],
//!   "resolution": 0.1,
//!   "hexSize": 0.5,
//!   "profile": "car",
//!   "provider": "osrm",
//!   "deintersect": true
//! }
//! ```
//!
//! Every field is optional at parse time; missing values fall back to the
//! caller's [`IsoConfig`].  Extra keys on a distance entry are carried into
//! the output ring's properties.

use serde::{Deserialize, Serialize};

use crate::ring::{distance_value, DISTANCE_KEY};
use crate::{DistanceMetadata, GeoPoint, IsoConfig, Properties, ProviderKind, RoutingProfile};

/// GeoJSON `Point` geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OriginPoint {
    #[serde(rename = "type", default = "point_type")]
    pub kind: String,
    /// `[lon, lat]`
    pub coordinates: [f64; 2],
}

fn point_type() -> String {
    "Point".to_string()
}

impl OriginPoint {
    pub fn new(origin: GeoPoint) -> Self {
        Self { kind: point_type(), coordinates: [origin.lon, origin.lat] }
    }

    pub fn to_geo_point(&self) -> GeoPoint {
        GeoPoint::new(self.coordinates[0], self.coordinates[1])
    }
}

/// One requested distance plus the caller's free-form properties.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistanceEntry {
    pub distance: f64,
    #[serde(flatten)]
    pub properties: Properties,
}

impl DistanceEntry {
    pub fn new(distance: f64) -> Self {
        Self { distance, properties: Properties::new() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestBody {
    pub origin:      Option<OriginPoint>,
    pub distances:   Vec<DistanceEntry>,
    pub resolution:  Option<f64>,
    pub hex_size:    Option<f64>,
    pub profile:     Option<RoutingProfile>,
    pub provider:    Option<ProviderKind>,
    pub deintersect: Option<bool>,
}

impl RequestBody {
    pub fn origin(&self) -> Option<GeoPoint> {
        self.origin.as_ref().map(OriginPoint::to_geo_point)
    }

    /// Requested distances in request order.
    pub fn distances(&self) -> Vec<f64> {
        self.distances.iter().map(|e| e.distance).collect()
    }

    /// Per-distance properties, each entry including its own `distance` key.
    /// A distance listed twice keeps the last entry's properties.
    pub fn metadata(&self) -> DistanceMetadata {
        let mut meta = DistanceMetadata::new();
        for entry in &self.distances {
            let mut props = entry.properties.clone();
            props.insert(DISTANCE_KEY.to_string(), distance_value(entry.distance));
            meta.insert(entry.distance, props);
        }
        meta
    }

    /// Overlay the options present in this body onto `config`.
    pub fn apply_to(&self, config: &mut IsoConfig) {
        if let Some(r) = self.resolution {
            config.resolution = r;
        }
        if let Some(h) = self.hex_size {
            config.hex_size = h;
        }
        if let Some(p) = self.profile {
            config.profile = p;
        }
        if let Some(p) = self.provider {
            config.provider = p;
        }
        if let Some(d) = self.deintersect {
            config.deintersect = d;
        }
    }

    /// Replace the distance list, dropping any per-distance properties.
    pub fn set_distances(&mut self, distances: &[f64]) {
        self.distances = distances.iter().copied().map(DistanceEntry::new).collect();
    }
}
