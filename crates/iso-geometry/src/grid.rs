//! Bounding box and point lattice construction.
//!
//! The lattice follows the usual point-grid convention: the spacing in km is
//! converted to degrees along the box's southern edge (x) and western edge
//! (y), as many whole steps as fit are taken, and the leftover margin is
//! split evenly on both sides.  Points are emitted column by column, west to
//! east, each column south to north.

use iso_core::{BoundingBox, GeoPoint};

use crate::{GeometryError, GeometryResult};

/// Upper bound on the number of points [`point_grid`] will generate.
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Envelope of the four cardinal destinations at `radius_km` from `origin`.
pub fn bbox_around(origin: GeoPoint, radius_km: f64) -> BoundingBox {
    let cardinal = [0.0, 90.0, 180.0, 270.0].map(|b| origin.destination(radius_km, b));
    // Four points are never empty.
    BoundingBox::from_points(cardinal).unwrap_or(BoundingBox::new(
        origin.lon, origin.lat, origin.lon, origin.lat,
    ))
}

/// Uniform lattice covering `bbox` at `spacing_km`.
///
/// A spacing wider than the box yields the single centre point.
///
/// # Errors
///
/// [`GeometryError::TooLarge`] when the lattice would exceed
/// [`MAX_GRID_POINTS`]; checked before anything is allocated.
pub fn point_grid(bbox: &BoundingBox, spacing_km: f64) -> GeometryResult<Vec<GeoPoint>> {
    let layout = Lattice::new(bbox, spacing_km)?;

    let mut points = Vec::with_capacity(layout.len());
    for i in 0..=layout.columns {
        let lon = bbox.west + layout.dx + i as f64 * layout.cell_w;
        for j in 0..=layout.rows {
            let lat = bbox.south + layout.dy + j as f64 * layout.cell_h;
            points.push(GeoPoint::new(lon, lat));
        }
    }
    Ok(points)
}

/// Number of points [`point_grid`] would produce, without producing them.
pub fn point_grid_len(bbox: &BoundingBox, spacing_km: f64) -> GeometryResult<usize> {
    Lattice::new(bbox, spacing_km).map(|l| l.len())
}

struct Lattice {
    columns: usize,
    rows:    usize,
    cell_w:  f64,
    cell_h:  f64,
    dx:      f64,
    dy:      f64,
}

impl Lattice {
    fn new(bbox: &BoundingBox, spacing_km: f64) -> GeometryResult<Self> {
        if !(spacing_km.is_finite() && spacing_km > 0.0) {
            return Err(GeometryError::InvalidInput(format!(
                "grid spacing must be positive (got {spacing_km})"
            )));
        }

        let width  = bbox.width();
        let height = bbox.height();
        if !(width > 0.0 && height > 0.0) {
            return Err(GeometryError::InvalidInput(format!(
                "bounding box has no area ({width} x {height} degrees)"
            )));
        }

        let south_west = GeoPoint::new(bbox.west, bbox.south);
        let x_km = south_west.distance_km(GeoPoint::new(bbox.east, bbox.south));
        let y_km = south_west.distance_km(GeoPoint::new(bbox.west, bbox.north));

        let cell_w = spacing_km / x_km * width;
        let cell_h = spacing_km / y_km * height;

        let columns_f = (width / cell_w).floor();
        let rows_f    = (height / cell_h).floor();
        let count = (columns_f + 1.0) * (rows_f + 1.0);
        if !(count.is_finite() && count <= MAX_GRID_POINTS as f64) {
            return Err(GeometryError::TooLarge { what: "point grid", count, limit: MAX_GRID_POINTS });
        }

        let columns = columns_f as usize;
        let rows    = rows_f as usize;

        Ok(Self {
            columns,
            rows,
            cell_w,
            cell_h,
            dx: (width - columns as f64 * cell_w) * 0.5,
            dy: (height - rows as f64 * cell_h) * 0.5,
        })
    }

    fn len(&self) -> usize {
        (self.columns + 1) * (self.rows + 1)
    }
}
