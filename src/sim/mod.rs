//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, every draw in a pinned order
//! - No wall-clock time, hardware randomness, or rendering state
//! - No I/O; runnable headlessly on the server
//!
//! The same seed and the same per-tick key sets always produce the same
//! run, which is what makes server-side replay verification possible.

pub mod collision;
pub mod rng;
pub mod state;
pub mod tick;
pub mod worldgen;

pub use rng::Mulberry32;
pub use state::{Coin, Enemy, GameState, Platform, Player, TickEvents};
pub use tick::{ActiveKeys, simulate_tick};
pub use worldgen::{
    generate_initial_platforms, generate_platform, should_spawn_coin, should_spawn_enemy,
};
