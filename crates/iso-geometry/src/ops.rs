//! Circles, boolean operations and small polygon utilities.

use geo::{Area, BooleanOps};
use geo_types::{Coord, LineString, MultiPolygon, Polygon};

use iso_core::GeoPoint;

/// Vertex count of the clipping disc.
pub const CIRCLE_STEPS: usize = 64;

/// Geodesic circle of `radius_km` around `center`, counter-clockwise, with
/// `steps` distinct vertices.
pub fn circle(center: GeoPoint, radius_km: f64, steps: usize) -> Polygon<f64> {
    let steps = steps.max(3);
    let mut ring: Vec<Coord<f64>> = (0..steps)
        .map(|i| {
            // Negative bearings walk counter-clockwise.
            let bearing = -(i as f64) * 360.0 / steps as f64;
            Coord::from(center.destination(radius_km, bearing))
        })
        .collect();
    ring.push(ring[0]);
    Polygon::new(LineString::new(ring), vec![])
}

pub fn intersection(a: &MultiPolygon<f64>, b: &Polygon<f64>) -> MultiPolygon<f64> {
    a.intersection(&MultiPolygon(vec![b.clone()]))
}

pub fn difference(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    if b.0.is_empty() {
        return a.clone();
    }
    a.difference(b)
}

/// Union of all `parts`, merged pairwise in a balanced tree.
pub fn union_all<I>(parts: I) -> MultiPolygon<f64>
where
    I: IntoIterator<Item = MultiPolygon<f64>>,
{
    let mut level: Vec<MultiPolygon<f64>> = parts.into_iter().filter(|p| !p.0.is_empty()).collect();
    while level.len() > 1 {
        let mut merged = Vec::with_capacity(level.len().div_ceil(2));
        let mut it = level.into_iter();
        while let Some(a) = it.next() {
            match it.next() {
                Some(b) => merged.push(a.union(&b)),
                None    => merged.push(a),
            }
        }
        level = merged;
    }
    level.pop().unwrap_or_else(|| MultiPolygon(vec![]))
}

/// Round every coordinate to `decimals` places.
pub fn round_polygon(polygon: &Polygon<f64>, decimals: i32) -> Polygon<f64> {
    let factor = 10f64.powi(decimals);
    let round_ring = |ls: &LineString<f64>| -> LineString<f64> {
        ls.0.iter()
            .map(|c| Coord {
                x: (c.x * factor).round() / factor,
                y: (c.y * factor).round() / factor,
            })
            .collect()
    };
    Polygon::new(
        round_ring(polygon.exterior()),
        polygon.interiors().iter().map(round_ring).collect(),
    )
}

/// Planar area in square degrees.  Only meaningful for comparisons between
/// geometries in the same neighbourhood.
pub fn area(geometry: &MultiPolygon<f64>) -> f64 {
    geometry.unsigned_area()
}
