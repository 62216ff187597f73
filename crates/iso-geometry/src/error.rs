//! Geometry error type.

use std::fmt;

use thiserror::Error;

/// Why a traced hull was rejected as kinked.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KinkKind {
    /// Fewer than three distinct points, or all of them collinear.
    Degenerate,
    /// No triangle survived the edge-length filter.
    Empty,
    /// The boundary touches itself at a vertex.
    SelfTouching,
    /// The hull splits into this many disjoint components.
    Disconnected(usize),
}

impl fmt::Display for KinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KinkKind::Degenerate      => f.write_str("degenerate point set"),
            KinkKind::Empty           => f.write_str("no triangle within the edge limit"),
            KinkKind::SelfTouching    => f.write_str("boundary touches itself"),
            KinkKind::Disconnected(n) => write!(f, "hull splits into {n} components"),
        }
    }
}

/// Errors produced by `iso-geometry`.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The hull is unusable at the current sampling resolution.  Retryable.
    #[error("kinked hull: {0}")]
    Kink(KinkKind),

    #[error("triangulation failed: {0}")]
    Triangulation(String),

    #[error("invalid geometry input: {0}")]
    InvalidInput(String),

    /// A lattice or tessellation would exceed its size limit.
    #[error("{what} would hold {count} items (limit {limit})")]
    TooLarge {
        what:  &'static str,
        count: f64,
        limit: usize,
    },
}

impl GeometryError {
    pub fn is_kink(&self) -> bool {
        matches!(self, GeometryError::Kink(_))
    }

    pub fn is_too_large(&self) -> bool {
        matches!(self, GeometryError::TooLarge { .. })
    }
}

pub type GeometryResult<T> = Result<T, GeometryError>;
