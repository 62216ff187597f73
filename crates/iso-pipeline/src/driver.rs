//! Pipeline driver.

use iso_core::{CoreError, DistanceMetadata, GeoPoint, IsoConfig, RingSet};
use iso_geometry::{bbox_around, hex_grid_len, point_grid_len};
use iso_route::Router;

use crate::{
    annotate, deintersect, trace_all, IsoObserver, KinkRetryController, PipelineError,
    PipelineResult, RetryState, SampleGrid, Step, TraceError,
};

/// Isodistance computation over one router.
///
/// Holds no per-request state: every [`compute`][Isodist::compute] call owns
/// its grid and retry state, so one `Isodist` may serve many requests.
///
/// # Example
///
/// ```rust,ignore
/// let isodist = Isodist::new(config, &router);
/// let rings = isodist
///     .compute(origin, &[7.0, 5.0, 2.0], &metadata, &mut NoopObserver)
///     .await?;
/// assert_eq!(rings.len(), 3);
/// ```
pub struct Isodist<'r, R: Router> {
    config: IsoConfig,
    router: &'r R,
}

impl<'r, R: Router> Isodist<'r, R> {
    pub fn new(config: IsoConfig, router: &'r R) -> Self {
        Self { config, router }
    }

    pub fn config(&self) -> &IsoConfig {
        &self.config
    }

    /// Trace one ring per entry of `distances`, largest first.
    ///
    /// # Errors
    ///
    /// - Validation errors before any router call (see [`Self::validate`]).
    /// - [`PipelineError::RetryBudgetExceeded`] when every attempt kinked.
    /// - [`PipelineError::Trace`] for a non-kink tracing failure.
    /// - [`PipelineError::CardinalityMismatch`] if the ring count is off.
    pub async fn compute<O: IsoObserver>(
        &self,
        origin:    GeoPoint,
        distances: &[f64],
        metadata:  &DistanceMetadata,
        observer:  &mut O,
    ) -> PipelineResult<RingSet> {
        self.compute_with_grid(origin, distances, metadata, observer)
            .await
            .map(|(rings, _)| rings)
    }

    /// Like [`compute`][Self::compute], also returning the annotated grid of
    /// the successful attempt.
    pub async fn compute_with_grid<O: IsoObserver>(
        &self,
        origin:    GeoPoint,
        distances: &[f64],
        metadata:  &DistanceMetadata,
        observer:  &mut O,
    ) -> PipelineResult<(RingSet, SampleGrid)> {
        self.validate(origin, distances)?;

        let radius = distances.iter().copied().fold(f64::MIN, f64::max);
        let mut controller = KinkRetryController::new(RetryState::from_config(&self.config));

        let (rings, grid) = loop {
            let resolution = controller.begin_attempt();
            let attempt = controller.state().attempt;
            observer.on_attempt(attempt, resolution);
            tracing::info!(attempt, resolution, "starting attempt");

            let mut grid = SampleGrid::generate(origin, radius, resolution)?;
            observer.on_grid(attempt, grid.len());

            let unreachable = annotate(
                &mut grid,
                origin,
                self.config.profile,
                self.router,
                self.config.chunk_size,
                observer,
            )
            .await?;
            tracing::debug!(attempt, points = grid.len(), unreachable, "grid annotated");

            let results = trace_all(&grid, origin, distances, self.config.hex_size);
            for result in &results {
                if let Err(TraceError::Kink { distance, kind }) = result {
                    tracing::warn!(attempt, resolution, distance, %kind, "kinked contour");
                    observer.on_kink(attempt, *distance, *kind);
                }
            }

            match controller.advance(results)? {
                Step::Done(rings) => break (rings, grid),
                Step::Retry { resolution } => {
                    tracing::info!(attempt, next_resolution = resolution, "resampling after kink");
                }
            }
        };

        for ring in &rings {
            observer.on_traced(ring.distance, ring.geometry.0.len());
        }

        let mut rings = RingSet::from_rings(rings);
        if self.config.deintersect {
            rings = deintersect(rings);
        }

        for ring in rings.as_mut_slice() {
            match metadata.get(ring.distance) {
                Some(props) => ring.merge_properties(props),
                None => {
                    tracing::warn!(distance = ring.distance, "no metadata for distance");
                    observer.on_missing_metadata(ring.distance);
                }
            }
        }

        if rings.len() != distances.len() {
            return Err(PipelineError::CardinalityMismatch {
                expected: distances.len(),
                got:      rings.len(),
            });
        }

        Ok((rings, grid))
    }

    /// Check the request before any router call.
    ///
    /// Rejects an unroutable origin, an empty distance list, non-positive,
    /// non-finite or repeated distances, and an invalid config.  Also rejects
    /// a resolution or hex size so fine that the first sample grid or a hex
    /// tessellation of the largest disc would exceed its size limit.
    pub fn validate(&self, origin: GeoPoint, distances: &[f64]) -> PipelineResult<()> {
        if !origin.is_routable() {
            return Err(CoreError::validation(format!("origin {origin} is out of range")).into());
        }
        if distances.is_empty() {
            return Err(CoreError::validation("at least one distance is required").into());
        }
        for (i, &d) in distances.iter().enumerate() {
            if !(d.is_finite() && d > 0.0) {
                return Err(CoreError::validation(format!(
                    "distances must be greater than 0 (got {d})"
                ))
                .into());
            }
            if distances[..i].contains(&d) {
                return Err(CoreError::validation(format!("distance {d} is given twice")).into());
            }
        }
        self.config.validate()?;

        let radius = distances.iter().copied().fold(f64::MIN, f64::max);
        let bbox = bbox_around(origin, radius);
        point_grid_len(&bbox, self.config.resolution).map_err(PipelineError::from_grid)?;
        if self.config.hex_size > 0.0 {
            hex_grid_len(&bbox, self.config.hex_size).map_err(PipelineError::from_grid)?;
        }
        Ok(())
    }
}
