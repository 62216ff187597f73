//! Kink retry controller.
//!
//! ```text
//!            ┌──────── kink, budget left ────────┐
//!            ▼                                    │
//!  Tracing ──┼── all clean ─────────► Done        │
//!            ├── kink ──────────────► Retrying ───┘
//!            ├── kink, budget spent ► Failed (RetryBudgetExceeded)
//!            └── other failure ─────► Failed (fatal, no retry)
//! ```
//!
//! All distances of an attempt succeed or fail together.  When one attempt
//! yields both a kink and a fatal error, the fatal error wins.

use iso_core::{IsoConfig, Ring};

use crate::{PipelineError, PipelineResult, TraceError};

/// Sampling state of one pipeline invocation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RetryState {
    /// Grid spacing of the current attempt, km.
    pub resolution:    f64,
    /// Current attempt, counting from 1.
    pub attempt:       u32,
    pub max_attempts:  u32,
    pub growth_factor: f64,
}

impl RetryState {
    pub fn from_config(config: &IsoConfig) -> Self {
        Self {
            resolution:    config.resolution,
            attempt:       1,
            max_attempts:  config.max_attempts,
            growth_factor: config.growth_factor,
        }
    }

    #[inline]
    pub fn budget_left(&self) -> bool {
        self.attempt < self.max_attempts
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Tracing,
    Retrying,
    Done,
    Failed,
}

/// What the driver does after feeding an attempt to the controller.
#[derive(Debug)]
pub enum Step {
    /// Every distance traced cleanly.
    Done(Vec<Ring>),
    /// Resample at `resolution` and trace again.
    Retry { resolution: f64 },
}

pub struct KinkRetryController {
    state: RetryState,
    phase: Phase,
}

impl KinkRetryController {
    pub fn new(state: RetryState) -> Self {
        Self { state, phase: Phase::Tracing }
    }

    pub fn state(&self) -> RetryState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Start the next attempt and return its resolution.
    pub fn begin_attempt(&mut self) -> f64 {
        if self.phase == Phase::Retrying {
            self.phase = Phase::Tracing;
        }
        self.state.resolution
    }

    /// Feed the per-distance results of the current attempt.
    ///
    /// # Errors
    ///
    /// The first fatal [`TraceError`] of the attempt, or
    /// [`PipelineError::RetryBudgetExceeded`] when a kink remains on the
    /// last allowed attempt.
    pub fn advance(&mut self, results: Vec<Result<Ring, TraceError>>) -> PipelineResult<Step> {
        let mut rings = Vec::with_capacity(results.len());
        let mut kinked = false;
        let mut fatal = None;

        for result in results {
            match result {
                Ok(ring) => rings.push(ring),
                Err(e) if e.is_kink() => kinked = true,
                Err(e) => {
                    fatal.get_or_insert(e);
                }
            }
        }

        if let Some(e) = fatal {
            self.phase = Phase::Failed;
            return Err(e.into());
        }

        if !kinked {
            self.phase = Phase::Done;
            return Ok(Step::Done(rings));
        }

        if !self.state.budget_left() {
            self.phase = Phase::Failed;
            return Err(PipelineError::RetryBudgetExceeded {
                attempts:   self.state.attempt,
                resolution: self.state.resolution,
            });
        }

        self.state.resolution *= self.state.growth_factor;
        self.state.attempt += 1;
        self.phase = Phase::Retrying;
        Ok(Step::Retry { resolution: self.state.resolution })
    }
}
