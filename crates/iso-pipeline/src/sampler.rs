//! Sample grid: the lattice of points whose network distance is measured.

use iso_core::{BoundingBox, CoreError, GeoPoint};
use iso_geometry::{bbox_around, point_grid};

use crate::{PipelineError, PipelineResult};

/// One lattice point and its network distance from the origin.
///
/// `distance` is `None` until annotated, then either a non-negative number
/// of km or `f64::INFINITY` for points the router could not reach.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SamplePoint {
    pub point:    GeoPoint,
    pub distance: Option<f64>,
}

impl SamplePoint {
    #[inline]
    pub fn is_within(&self, distance_km: f64) -> bool {
        self.distance.is_some_and(|d| d <= distance_km)
    }

    #[inline]
    pub fn is_unreachable(&self) -> bool {
        self.distance == Some(f64::INFINITY)
    }
}

#[derive(Clone, Debug)]
pub struct SampleGrid {
    points:     Vec<SamplePoint>,
    bbox:       BoundingBox,
    resolution: f64,
}

impl SampleGrid {
    /// Lattice at `resolution` km covering the box that reaches `radius_km`
    /// from `origin` in each cardinal direction.
    ///
    /// # Errors
    ///
    /// Validation error when `radius_km` or `resolution` is not a positive
    /// finite number, or when the lattice would exceed
    /// [`MAX_GRID_POINTS`](iso_geometry::MAX_GRID_POINTS).
    pub fn generate(origin: GeoPoint, radius_km: f64, resolution: f64) -> PipelineResult<Self> {
        if !(radius_km.is_finite() && radius_km > 0.0) {
            return Err(CoreError::validation(format!(
                "grid radius must be greater than 0 (got {radius_km})"
            ))
            .into());
        }
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(CoreError::validation(format!(
                "resolution must be greater than 0 (got {resolution})"
            ))
            .into());
        }

        let bbox = bbox_around(origin, radius_km);
        let points = point_grid(&bbox, resolution)
            .map_err(PipelineError::from_grid)?
            .into_iter()
            .map(|point| SamplePoint { point, distance: None })
            .collect();

        Ok(Self { points, bbox, resolution })
    }

    /// Assemble a grid from already-sampled points.
    pub fn from_parts(points: Vec<SamplePoint>, bbox: BoundingBox, resolution: f64) -> Self {
        Self { points, bbox, resolution }
    }

    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub(crate) fn points_mut(&mut self) -> &mut [SamplePoint] {
        &mut self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Spacing in km this grid was generated with.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// `true` once every point carries a distance.
    pub fn is_annotated(&self) -> bool {
        self.points.iter().all(|p| p.distance.is_some())
    }

    /// Positions of the points at most `distance_km` from the origin.
    pub fn reachable_within(&self, distance_km: f64) -> Vec<GeoPoint> {
        self.points
            .iter()
            .filter(|p| p.is_within(distance_km))
            .map(|p| p.point)
            .collect()
    }

    pub fn unreachable_count(&self) -> usize {
        self.points.iter().filter(|p| p.is_unreachable()).count()
    }
}
