//! Contour tracing for one distance.
//!
//! ```text
//! reachable points (distance ≤ D)
//!   → concave hull, max edge = hex size (or 0.5 km without hex fitting)
//!   → ∩ 64-gon of radius D around the origin
//!   → hex fit (hex size > 0 only)
//! ```

use geo_types::MultiPolygon;

use iso_core::{GeoPoint, Ring};
use iso_geometry::{circle, concave_hull, hex_fit, intersection, GeometryError, CIRCLE_STEPS};

use crate::{SampleGrid, TraceError};

/// Hull edge limit when hex fitting is off.
pub const DEFAULT_MAX_EDGE_KM: f64 = 0.5;

/// Trace the contour of `distance` km over an annotated grid.
///
/// # Errors
///
/// [`TraceError::Kink`] when the reachable set does not form one simple
/// polygon at this resolution (including an empty or degenerate set).
/// Any other variant is fatal.
pub fn trace(
    grid:     &SampleGrid,
    origin:   GeoPoint,
    distance: f64,
    hex_size: f64,
) -> Result<Ring, TraceError> {
    let reachable = grid.reachable_within(distance);
    let max_edge = if hex_size > 0.0 { hex_size } else { DEFAULT_MAX_EDGE_KM };

    let hull = concave_hull(&reachable, max_edge).map_err(|e| match e {
        GeometryError::Kink(kind) => TraceError::Kink { distance, kind },
        source => TraceError::Geometry { distance, source },
    })?;

    let clipped = intersection(&MultiPolygon(vec![hull]), &circle(origin, distance, CIRCLE_STEPS));
    if clipped.0.is_empty() {
        return Err(TraceError::EmptyClip { distance });
    }

    if hex_size <= 0.0 {
        return Ok(Ring::new(distance, clipped));
    }

    let fitted = hex_fit(&clipped, hex_size).map_err(|source| TraceError::Geometry { distance, source })?;
    if fitted.0.is_empty() {
        return Err(TraceError::EmptyHexUnion { distance });
    }
    Ok(Ring::new(distance, fitted))
}

/// Trace every distance of one attempt.  Results keep the order of
/// `distances`.
pub fn trace_all(
    grid:      &SampleGrid,
    origin:    GeoPoint,
    distances: &[f64],
    hex_size:  f64,
) -> Vec<Result<Ring, TraceError>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        distances
            .par_iter()
            .map(|&d| trace(grid, origin, d, hex_size))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        distances
            .iter()
            .map(|&d| trace(grid, origin, d, hex_size))
            .collect()
    }
}
