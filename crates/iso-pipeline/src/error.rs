use iso_core::CoreError;
use iso_geometry::{GeometryError, KinkKind};
use thiserror::Error;

/// Failure to trace the contour of one distance.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The hull is unusable at this resolution.  The retry controller
    /// resamples; it never reaches the caller as-is.
    #[error("contour for {distance} km is kinked: {kind}")]
    Kink { distance: f64, kind: KinkKind },

    #[error("contour for {distance} km is empty after clipping to the distance disc")]
    EmptyClip { distance: f64 },

    #[error("hex fit for {distance} km produced no cells")]
    EmptyHexUnion { distance: f64 },

    #[error("geometry failure while tracing {distance} km: {source}")]
    Geometry {
        distance: f64,
        source:   GeometryError,
    },
}

impl TraceError {
    pub fn is_kink(&self) -> bool {
        matches!(self, TraceError::Kink { .. })
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("sample grid generation failed: {0}")]
    Grid(#[from] GeometryError),

    #[error("no clean contour after {attempts} attempts (last resolution {resolution} km)")]
    RetryBudgetExceeded {
        attempts:   u32,
        resolution: f64,
    },

    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error("traced {got} rings for {expected} requested distances")]
    CardinalityMismatch {
        expected: usize,
        got:      usize,
    },
}

impl PipelineError {
    /// Oversized lattices are the caller's doing and surface as validation
    /// errors; other geometry failures stay internal.
    pub(crate) fn from_grid(e: GeometryError) -> Self {
        if e.is_too_large() {
            PipelineError::Core(CoreError::validation(e.to_string()))
        } else {
            PipelineError::Grid(e)
        }
    }

    /// `true` for failures caused by the request itself: bad input, or a
    /// shape that cannot be traced at any tried resolution.  Hosts report
    /// these briefly; everything else is an internal fault worth a full log.
    pub fn is_known(&self) -> bool {
        match self {
            PipelineError::Core(CoreError::Validation(_) | CoreError::Parse(_)) => true,
            PipelineError::RetryBudgetExceeded { .. } => true,
            _ => false,
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
