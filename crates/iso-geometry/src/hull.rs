//! Kink-aware concave hull.
//!
//! # Algorithm
//!
//! 1. Delaunay-triangulate the input in lon/lat space (`spade`).
//! 2. Keep every triangle whose three edges are all at most `max_edge_km`
//!    long (great-circle length).
//! 3. Collect the kept triangles' directed edges (counter-clockwise).  An
//!    edge whose reverse is absent lies on the boundary.
//! 4. Chain boundary edges into closed rings.  Counter-clockwise rings are
//!    outer shells, clockwise rings are holes.
//!
//! The result must be a single simple polygon.  Anything else is reported as
//! a [`GeometryError::Kink`] so the caller can resample:
//!
//! | Condition                                   | Kind             |
//! |---------------------------------------------|------------------|
//! | < 3 points, or all collinear                | `Degenerate`     |
//! | every triangle has an edge over the limit   | `Empty`          |
//! | a boundary vertex starts two boundary edges | `SelfTouching`   |
//! | more than one outer shell                   | `Disconnected`   |

use geo_types::{Coord, LineString, Polygon};
use rustc_hash::{FxHashMap, FxHashSet};
use spade::{DelaunayTriangulation, Point2, Triangulation};

use iso_core::GeoPoint;

use crate::{GeometryError, GeometryResult, KinkKind};

/// Concave hull of `points` with maximum triangle edge `max_edge_km`.
pub fn concave_hull(points: &[GeoPoint], max_edge_km: f64) -> GeometryResult<Polygon<f64>> {
    if !(max_edge_km.is_finite() && max_edge_km > 0.0) {
        return Err(GeometryError::InvalidInput(format!(
            "max edge must be positive (got {max_edge_km})"
        )));
    }
    if points.len() < 3 {
        return Err(GeometryError::Kink(KinkKind::Degenerate));
    }

    let vertices: Vec<Point2<f64>> = points.iter().map(|p| Point2::new(p.lon, p.lat)).collect();
    let tri = DelaunayTriangulation::<Point2<f64>>::bulk_load(vertices)
        .map_err(|e| GeometryError::Triangulation(format!("{e:?}")))?;

    if tri.num_inner_faces() == 0 {
        return Err(GeometryError::Kink(KinkKind::Degenerate));
    }

    // Vertex positions by spade's vertex index (bulk loading reorders).
    let mut position = vec![Coord { x: 0.0, y: 0.0 }; tri.num_vertices()];
    for v in tri.vertices() {
        let p = v.position();
        position[v.fix().index()] = Coord { x: p.x, y: p.y };
    }

    // ── Filter triangles, collect directed edges ──────────────────────────
    let mut edges: FxHashSet<(usize, usize)> = FxHashSet::default();
    for face in tri.inner_faces() {
        let mut ids = face.vertices().map(|v| v.fix().index());
        if signed_area2(&ids.map(|i| position[i])) < 0.0 {
            ids.swap(1, 2);
        }
        let short = (0..3).all(|k| {
            let a = GeoPoint::from(position[ids[k]]);
            let b = GeoPoint::from(position[ids[(k + 1) % 3]]);
            a.distance_km(b) <= max_edge_km
        });
        if short {
            for k in 0..3 {
                edges.insert((ids[k], ids[(k + 1) % 3]));
            }
        }
    }
    if edges.is_empty() {
        return Err(GeometryError::Kink(KinkKind::Empty));
    }

    // ── Boundary edges: those without a twin ──────────────────────────────
    let mut next: FxHashMap<usize, usize> = FxHashMap::default();
    for &(a, b) in &edges {
        if !edges.contains(&(b, a)) && next.insert(a, b).is_some() {
            return Err(GeometryError::Kink(KinkKind::SelfTouching));
        }
    }

    // ── Chain into rings ──────────────────────────────────────────────────
    let mut starts: Vec<usize> = next.keys().copied().collect();
    starts.sort_unstable();

    let mut shells: Vec<LineString<f64>> = Vec::new();
    let mut holes:  Vec<LineString<f64>> = Vec::new();

    for start in starts {
        if !next.contains_key(&start) {
            continue;
        }
        let mut ring = vec![position[start]];
        let mut cur = start;
        while let Some(to) = next.remove(&cur) {
            ring.push(position[to]);
            cur = to;
        }
        if cur != start || ring.len() < 4 {
            // Every vertex has out-degree one and in-degree one on a closed
            // triangle boundary, so an open chain means a broken mesh.
            return Err(GeometryError::Triangulation("boundary does not close".into()));
        }
        if signed_area2(&ring) > 0.0 {
            shells.push(LineString::new(ring));
        } else {
            holes.push(LineString::new(ring));
        }
    }

    match shells.len() {
        0 => Err(GeometryError::Kink(KinkKind::Empty)),
        1 => {
            let shell = shells.remove(0);
            Ok(Polygon::new(shell, holes))
        }
        n => Err(GeometryError::Kink(KinkKind::Disconnected(n))),
    }
}

/// Twice the signed shoelace area; positive for counter-clockwise order.
/// A trailing closing vertex contributes nothing.
fn signed_area2(ring: &[Coord<f64>]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum()
}
