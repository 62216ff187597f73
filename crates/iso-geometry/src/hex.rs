//! Hexagonal tessellation and hex-fitting.
//!
//! Cells are flat-topped regular hexagons whose side (= circumradius) is
//! given in km.  Degrees per km are taken at the box's middle latitude, so
//! cells are regular on the ground rather than in degree space.
//!
//! ```text
//!      ___       ___
//!     /   \___/   \      columns advance by 1.5 * r
//!     \___/   \___/      odd columns sit half a row higher
//!     /   \___/   \      rows advance by sqrt(3) * r
//!     \___/   \___/
//! ```

use geo::{BoundingRect, Intersects};
use geo_types::{Coord, LineString, MultiPolygon, Polygon};

use iso_core::BoundingBox;

use crate::ops::{round_polygon, union_all};
use crate::{GeometryError, GeometryResult};

/// Km per degree of latitude on the mean-radius sphere.
const KM_PER_DEGREE: f64 = 111.32;

/// Hex cells are rounded to this many decimals before merging so shared
/// edges of neighbouring cells coincide exactly.
pub const HEX_ROUND_DECIMALS: i32 = 6;

/// Upper bound on the number of cells [`hex_grid`] will generate.
pub const MAX_HEX_CELLS: usize = 250_000;

/// Flat-topped hexagons covering `bbox` with a one-cell margin on each side.
///
/// # Errors
///
/// [`GeometryError::TooLarge`] when the tessellation would exceed
/// [`MAX_HEX_CELLS`]; checked before anything is allocated.
pub fn hex_grid(bbox: &BoundingBox, side_km: f64) -> GeometryResult<Vec<Polygon<f64>>> {
    let HexLayout { columns, rows, x0, y0, dx, dy, rx, ry } = HexLayout::new(bbox, side_km)?;

    let mut cells = Vec::with_capacity(columns * rows);
    for i in 0..columns {
        let cx = x0 + i as f64 * dx;
        let shift = if i % 2 == 1 { dy * 0.5 } else { 0.0 };
        for j in 0..rows {
            let cy = y0 + j as f64 * dy + shift;
            cells.push(hexagon(cx, cy, rx, ry));
        }
    }
    Ok(cells)
}

/// Number of cells [`hex_grid`] would produce, without producing them.
pub fn hex_grid_len(bbox: &BoundingBox, side_km: f64) -> GeometryResult<usize> {
    HexLayout::new(bbox, side_km).map(|l| l.columns * l.rows)
}

struct HexLayout {
    columns: usize,
    rows:    usize,
    x0:      f64,
    y0:      f64,
    dx:      f64,
    dy:      f64,
    rx:      f64,
    ry:      f64,
}

impl HexLayout {
    fn new(bbox: &BoundingBox, side_km: f64) -> GeometryResult<Self> {
        if !(side_km.is_finite() && side_km > 0.0) {
            return Err(GeometryError::InvalidInput(format!(
                "hex side must be positive (got {side_km})"
            )));
        }

        let center = bbox.center();
        let cos_lat = center.lat.to_radians().cos().max(1e-6);
        let rx = side_km / (KM_PER_DEGREE * cos_lat);
        let ry = side_km / KM_PER_DEGREE;

        let dx = 1.5 * rx;
        let dy = 3f64.sqrt() * ry;

        let columns_f = (bbox.width() / dx).ceil() + 2.0;
        let rows_f    = (bbox.height() / dy).ceil() + 2.0;
        let count = columns_f * rows_f;
        if !(count.is_finite() && count <= MAX_HEX_CELLS as f64) {
            return Err(GeometryError::TooLarge { what: "hex grid", count, limit: MAX_HEX_CELLS });
        }

        let columns = columns_f as usize;
        let rows    = rows_f as usize;

        Ok(Self {
            columns,
            rows,
            x0: center.lon - (columns - 1) as f64 * dx * 0.5,
            y0: center.lat - (rows - 1) as f64 * dy * 0.5,
            dx,
            dy,
            rx,
            ry,
        })
    }
}

fn hexagon(cx: f64, cy: f64, rx: f64, ry: f64) -> Polygon<f64> {
    let mut ring: Vec<Coord<f64>> = (0..6)
        .map(|k| {
            let a = (60.0 * k as f64).to_radians();
            Coord { x: cx + rx * a.cos(), y: cy + ry * a.sin() }
        })
        .collect();
    ring.push(ring[0]);
    Polygon::new(LineString::new(ring), vec![])
}

/// Approximate `shape` by the union of the hex cells that touch it.
///
/// Returns an empty geometry when `shape` is empty.
pub fn hex_fit(shape: &MultiPolygon<f64>, side_km: f64) -> GeometryResult<MultiPolygon<f64>> {
    let Some(rect) = shape.bounding_rect() else {
        return Ok(MultiPolygon(vec![]));
    };
    let cells = hex_grid(&BoundingBox::from(rect), side_km)?;

    let kept = cells
        .into_iter()
        .filter(|cell| cell.intersects(shape))
        .map(|cell| MultiPolygon(vec![round_polygon(&cell, HEX_ROUND_DECIMALS)]));

    Ok(union_all(kept))
}
