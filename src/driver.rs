//! Fixed-timestep accumulator
//!
//! Converts jittery wall-clock frame deltas into a whole number of
//! fixed-size simulation ticks. Wall time decides how MANY ticks run; it
//! never enters the simulation math, so frame-rate hiccups cannot change
//! a run's outcome.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// A frame delta larger than this is treated as a hitch and clamped,
/// instead of being paid back as a burst of catch-up ticks.
const MAX_FRAME_DT: f32 = 0.1;

/// Accumulates frame time and pays it out in `SIM_DT` slices.
#[derive(Debug, Clone, Default)]
pub struct FixedTimestep {
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's elapsed seconds; returns how many ticks to run.
    ///
    /// Capped at `MAX_SUBSTEPS` per frame so a long stall can't spiral.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.min(MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            ticks += 1;
        }
        ticks
    }

    /// Drop any banked time (use when resuming from pause, so the stall
    /// isn't simulated as catch-up ticks).
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
