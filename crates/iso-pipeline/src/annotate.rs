//! Distance annotation.
//!
//! The grid is routed in fixed-size chunks.  Every query of a chunk is in
//! flight at once, joined on the calling task; the next chunk starts only
//! after the whole chunk has settled.  A failed query marks its point
//! unreachable and is logged at `debug`; it never aborts the batch.

use futures::future::join_all;

use iso_core::{CoreError, GeoPoint, RoutingProfile};
use iso_route::Router;

use crate::{IsoObserver, PipelineResult, SampleGrid};

/// Route `origin` to every point of `grid` and store the distances.
///
/// Returns the number of points marked unreachable.
///
/// # Errors
///
/// Validation error when `chunk_size` is 0.  Router failures are absorbed.
pub async fn annotate<R, O>(
    grid:       &mut SampleGrid,
    origin:     GeoPoint,
    profile:    RoutingProfile,
    router:     &R,
    chunk_size: usize,
    observer:   &mut O,
) -> PipelineResult<usize>
where
    R: Router,
    O: IsoObserver,
{
    if chunk_size == 0 {
        return Err(CoreError::validation("chunk size must be greater than 0").into());
    }

    let chunks = grid.len().div_ceil(chunk_size);
    let mut unreachable = 0;

    for (index, chunk) in grid.points_mut().chunks_mut(chunk_size).enumerate() {
        let results = join_all(chunk.iter().map(|p| router.route(origin, p.point, profile))).await;

        let mut failed = 0;
        for (sample, result) in chunk.iter_mut().zip(results) {
            let distance = match result {
                Ok(km) if km >= 0.0 => km,
                Ok(km) => {
                    tracing::debug!(point = %sample.point, km, "router returned an invalid distance");
                    f64::INFINITY
                }
                Err(e) => {
                    tracing::debug!(point = %sample.point, error = %e, "route failed");
                    f64::INFINITY
                }
            };
            if distance == f64::INFINITY {
                failed += 1;
            }
            sample.distance = Some(distance);
        }

        unreachable += failed;
        observer.on_chunk(index, chunks, failed);
    }

    Ok(unreachable)
}
