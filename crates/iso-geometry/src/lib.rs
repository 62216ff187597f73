//! `iso-geometry` — the geometry kernel behind contour tracing.
//!
//! Everything operates on lon/lat degrees.  Lengths that matter to callers
//! (grid spacing, hull edge limit, circle radius, hex side) are given in km
//! and converted with great-circle distances from `iso-core`.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                   |
//! |-----------|------------------------------------------------------------|
//! | [`grid`]  | `bbox_around`, `point_grid`, `MAX_GRID_POINTS`             |
//! | [`hull`]  | `concave_hull` over a Delaunay triangulation (`spade`)     |
//! | [`ops`]   | `circle`, `intersection`, `difference`, `union_all`, area  |
//! | [`hex`]   | `hex_grid`, `hex_fit`, `MAX_HEX_CELLS`                     |
//! | [`error`] | `GeometryError`, `KinkKind`, `GeometryResult<T>`           |

pub mod error;
pub mod grid;
pub mod hex;
pub mod hull;
pub mod ops;


pub use error::{GeometryError, GeometryResult, KinkKind};
pub use grid::{bbox_around, point_grid, point_grid_len, MAX_GRID_POINTS};
pub use hex::{hex_fit, hex_grid, hex_grid_len, MAX_HEX_CELLS};
pub use hull::concave_hull;
pub use ops::{area, circle, difference, intersection, round_polygon, union_all, CIRCLE_STEPS};
