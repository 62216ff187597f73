//! Ring and ring-set containers.
//!
//! A [`Ring`] is the traced contour for one requested distance.  Its geometry
//! is always held as a `MultiPolygon`; single-part results are a one-element
//! collection.  Output writers collapse single-part rings back to a plain
//! polygon.

use geo_types::MultiPolygon;
use serde_json::{Map, Value};

/// Free-form feature properties attached to a ring.
pub type Properties = Map<String, Value>;

/// Property key that always carries the ring's distance.
pub const DISTANCE_KEY: &str = "distance";

// ── Ring ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Ring {
    /// Requested distance in km.
    pub distance: f64,
    pub geometry: MultiPolygon<f64>,
    pub properties: Properties,
}

impl Ring {
    /// Create a ring whose properties hold only its distance.
    pub fn new(distance: f64, geometry: MultiPolygon<f64>) -> Self {
        let mut properties = Properties::new();
        properties.insert(DISTANCE_KEY.to_string(), distance_value(distance));
        Self { distance, geometry, properties }
    }

    /// Merge caller-supplied properties into this ring.
    ///
    /// Caller values win over existing keys, except `distance`, which always
    /// reflects the traced distance.
    pub fn merge_properties(&mut self, extra: &Properties) {
        for (k, v) in extra {
            self.properties.insert(k.clone(), v.clone());
        }
        self.properties.insert(DISTANCE_KEY.to_string(), distance_value(self.distance));
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.0.is_empty()
    }
}

/// Whole-number distances serialise as integers so `2` round-trips as `2`.
pub(crate) fn distance_value(distance: f64) -> Value {
    if distance.fract() == 0.0 && distance.abs() < i64::MAX as f64 {
        Value::from(distance as i64)
    } else {
        serde_json::Number::from_f64(distance).map_or(Value::Null, Value::Number)
    }
}

// ── RingSet ───────────────────────────────────────────────────────────────────

/// Rings ordered by descending distance.
#[derive(Clone, Debug, Default)]
pub struct RingSet(Vec<Ring>);

impl RingSet {
    /// Take ownership of `rings` and sort them largest distance first.
    pub fn from_rings(mut rings: Vec<Ring>) -> Self {
        rings.sort_by(|a, b| b.distance.total_cmp(&a.distance));
        Self(rings)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ring> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Ring] {
        &self.0
    }

    pub fn as_mut_slice(&mut self) -> &mut [Ring] {
        &mut self.0
    }

    pub fn into_inner(self) -> Vec<Ring> {
        self.0
    }

    /// Distances in ring order.
    pub fn distances(&self) -> Vec<f64> {
        self.0.iter().map(|r| r.distance).collect()
    }

    /// The ring traced for `distance`, if any.
    pub fn get(&self, distance: f64) -> Option<&Ring> {
        self.0.iter().find(|r| r.distance == distance)
    }

    pub fn is_strictly_descending(&self) -> bool {
        self.0.windows(2).all(|w| w[0].distance > w[1].distance)
    }
}

impl IntoIterator for RingSet {
    type Item = Ring;
    type IntoIter = std::vec::IntoIter<Ring>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RingSet {
    type Item = &'a Ring;
    type IntoIter = std::slice::Iter<'a, Ring>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ── DistanceMetadata ──────────────────────────────────────────────────────────

/// Caller-supplied properties keyed by requested distance.
///
/// Distances are matched exactly; the request layer hands the same `f64`
/// values to the pipeline that it used as keys here.
#[derive(Clone, Debug, Default)]
pub struct DistanceMetadata {
    entries: Vec<(f64, Properties)>,
}

impl DistanceMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// One entry per distance, each holding just `{"distance": d}`.
    pub fn from_distances(distances: &[f64]) -> Self {
        let mut meta = Self::new();
        for &d in distances {
            let mut props = Properties::new();
            props.insert(DISTANCE_KEY.to_string(), distance_value(d));
            meta.insert(d, props);
        }
        meta
    }

    /// Insert or replace the properties for `distance`.
    pub fn insert(&mut self, distance: f64, properties: Properties) {
        match self.entries.iter_mut().find(|(d, _)| *d == distance) {
            Some(entry) => entry.1 = properties,
            None => self.entries.push((distance, properties)),
        }
    }

    pub fn get(&self, distance: f64) -> Option<&Properties> {
        self.entries
            .iter()
            .find(|(d, _)| *d == distance)
            .map(|(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
