//! `iso-pipeline` — from an origin and a list of distances to isodistance
//! rings.
//!
//! # One request
//!
//! ```text
//! validate origin, distances, config
//! loop (attempt = 1..=max_attempts):
//!   ① Sample    — bbox around the origin at the largest distance, point
//!                 lattice at the current resolution.
//!   ② Annotate  — route origin → every point, chunk by chunk; failures
//!                 mark the point unreachable.
//!   ③ Trace     — one contour per distance (parallel with `parallel`):
//!                 reachable points → concave hull → disc clip → hex fit.
//!   ④ Decide    — any kink: resolution *= growth, go to ①.
//!                 any other failure: abort.  all clean: done.
//! deintersect (optional) → merge metadata → check ring count
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                               |
//! |------------|------------------------------------------------------|
//! | `parallel` | Traces the distances of one attempt on Rayon's pool. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use iso_core::{GeoPoint, IsoConfig, DistanceMetadata};
//! use iso_pipeline::{Isodist, TracingObserver};
//!
//! let distances = [2.0, 5.0, 7.0];
//! let rings = Isodist::new(IsoConfig::default(), &router)
//!     .compute(origin, &distances, &DistanceMetadata::from_distances(&distances), &mut TracingObserver)
//!     .await?;
//! ```

pub mod annotate;
pub mod deintersect;
pub mod driver;
pub mod error;
pub mod observer;
pub mod retry;
pub mod sampler;
pub mod trace;


pub use annotate::annotate;
pub use deintersect::deintersect;
pub use driver::Isodist;
pub use error::{PipelineError, PipelineResult, TraceError};
pub use observer::{IsoObserver, NoopObserver, TracingObserver};
pub use retry::{KinkRetryController, Phase, RetryState, Step};
pub use sampler::{SampleGrid, SamplePoint};
pub use trace::{trace, trace_all, DEFAULT_MAX_EDGE_KM};
