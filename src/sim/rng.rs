//! Deterministic, portable pseudo-random number generator for the simulation.
//!
//! Implements Mulberry32 on 32-bit unsigned wraparound arithmetic. The
//! generator must produce bit-identical output on every platform and in
//! every reimplementation - live client and replaying server consume the
//! same draw sequence, and a single diverging bit desynchronizes every
//! draw after it. Do not substitute wider integer types or a stdlib/crate
//! RNG here; `wrapping_*` on `u32` is the entire point.

use serde::{Deserialize, Serialize};

/// Mulberry32 PRNG - the simulation's sole source of randomness.
///
/// Each session owns exactly one instance, created from the session seed
/// and passed by reference into every tick. Never share one across
/// sessions or concurrent replay calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Create a generator from a 32-bit seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Create a generator from the wire-format signed seed (bit-cast).
    pub fn from_seed(seed: i32) -> Self {
        Self::new(seed as u32)
    }

    /// Next uniform draw in [0, 1).
    ///
    /// The full 32-bit output is kept as the f64 numerator so the value is
    /// exact; narrow at the call site if f32 is enough.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        f64::from(t ^ (t >> 14)) / 4_294_967_296.0
    }

    /// Next uniform draw in [0, 1), narrowed to f32. Consumes one draw.
    pub fn next_f32(&mut self) -> f32 {
        self.next_f64() as f32
    }

    /// Uniform draw in [min, max). Consumes one draw.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Bernoulli draw with probability `p`. Consumes one draw.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Raw generator state, for draw-accounting assertions.
    pub fn state(&self) -> u32 {
        self.state
    }
}
