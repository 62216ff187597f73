//! Pipeline observer trait for progress reporting.

use iso_geometry::KinkKind;

/// Callbacks invoked by [`Isodist::compute`][crate::Isodist::compute] as a
/// request moves through its attempts.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — chunk progress
///
/// ```rust,ignore
/// struct Progress;
///
/// impl IsoObserver for Progress {
///     fn on_chunk(&mut self, chunk: usize, chunks: usize, _unreachable: usize) {
///         eprintln!("routed chunk {}/{chunks}", chunk + 1);
///     }
/// }
/// ```
pub trait IsoObserver {
    /// An attempt starts at `resolution` km.  `attempt` counts from 1.
    fn on_attempt(&mut self, _attempt: u32, _resolution: f64) {}

    /// The attempt's sample grid holds `points` points.
    fn on_grid(&mut self, _attempt: u32, _points: usize) {}

    /// Chunk `chunk` of `chunks` settled; `unreachable` points in it failed
    /// to route.
    fn on_chunk(&mut self, _chunk: usize, _chunks: usize, _unreachable: usize) {}

    /// The contour for `distance` was kinked; the attempt will be retried.
    fn on_kink(&mut self, _attempt: u32, _distance: f64, _kind: KinkKind) {}

    /// The contour for `distance` was traced with `parts` polygons.
    fn on_traced(&mut self, _distance: f64, _parts: usize) {}

    /// No caller metadata was supplied for `distance`.
    fn on_missing_metadata(&mut self, _distance: f64) {}
}

/// An [`IsoObserver`] that does nothing.
pub struct NoopObserver;

impl IsoObserver for NoopObserver {}

/// An [`IsoObserver`] that forwards progress to `tracing`.
///
/// Kinks and missing metadata are already logged by the pipeline at `warn`,
/// so only progress is forwarded here.
pub struct TracingObserver;

impl IsoObserver for TracingObserver {
    fn on_grid(&mut self, attempt: u32, points: usize) {
        tracing::info!(attempt, points, "sample grid ready");
    }

    fn on_chunk(&mut self, chunk: usize, chunks: usize, unreachable: usize) {
        tracing::debug!(chunk = chunk + 1, chunks, unreachable, "chunk routed");
    }

    fn on_traced(&mut self, distance: f64, parts: usize) {
        tracing::debug!(distance, parts, "contour traced");
    }
}
