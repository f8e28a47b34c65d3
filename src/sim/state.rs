//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here. State is created once per
//! session from a seed, mutated in place by `simulate_tick`, and discarded
//! on death or restart. The PRNG is deliberately NOT a field: it is owned
//! by the session and passed into every tick call, so state snapshots and
//! replays can never smuggle randomness across sessions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::Mulberry32;
use super::worldgen;
use crate::consts::*;

/// The player avatar. AABB is a `PLAYER_SIZE` square anchored at `pos`
/// (top-left corner, like every other entity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Presentation hint only; never read by the simulation
    pub facing_right: bool,
}

impl Player {
    /// Spawn standing on the start platform.
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(
                START_PLATFORM_X + (START_PLATFORM_WIDTH - PLAYER_SIZE) / 2.0,
                START_PLATFORM_Y - PLAYER_SIZE,
            ),
            vel: Vec2::ZERO,
            facing_right: true,
        }
    }

    /// Bottom edge of the player AABB.
    pub fn bottom(&self) -> f32 {
        self.pos.y + PLAYER_SIZE
    }
}

/// A platform segment. Immutable once generated, except for the shared
/// downward shift applied by camera scrolling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub has_spikes: bool,
    /// Horizontal offset of the spike strip from the platform's left edge
    pub spike_offset_x: f32,
}

impl Platform {
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    /// Left edge of the spike strip in world coordinates.
    pub fn spike_x(&self) -> f32 {
        self.pos.x + self.spike_offset_x
    }
}

/// A patrolling enemy.
///
/// `platform_index` is a positional back-reference into
/// `GameState::platforms`, not an owning pointer. World recycling removes
/// platforms from the front of that Vec, so every removal must re-index
/// surviving enemies or the reference silently points at the wrong platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    /// Patrol direction, +1.0 or -1.0
    pub direction: f32,
    pub platform_index: usize,
}

/// A collectible coin. `collected` flips false -> true exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub pos: Vec2,
    pub collected: bool,
}

/// Observational per-tick events for presentation (sound, effects).
/// Purely derived from the tick; the mutated state is the only real output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    pub jumped: bool,
    pub died: bool,
    pub coins_collected: u32,
    pub score_changed: bool,
}

/// Complete game state for one session (deterministic, serializable).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed, kept for diagnostics and run packaging
    pub seed: i32,
    pub player: Player,
    /// Ordered oldest/lowest first; index 0 is always the lowest platform
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub score: u64,
    /// High-water mark of total climb; never decreases, so height score
    /// is never refunded by falling
    pub max_height: f32,
    /// Total camera scroll so far
    pub camera_y: f32,
    /// Platforms recycled off the bottom; doubles as the difficulty scalar
    pub platforms_cleared: u32,
    pub is_dead: bool,
    /// Set by the external scheduler; the simulation only reads it
    pub is_paused: bool,
    /// Live ticks executed (paused ticks do not count)
    pub time_ticks: u64,
}

impl GameState {
    /// Create a fresh session state, consuming the seed's initial world
    /// generation draws from `rng`.
    pub fn new(seed: i32, rng: &mut Mulberry32) -> Self {
        Self {
            seed,
            player: Player::spawn(),
            platforms: worldgen::generate_initial_platforms(rng),
            enemies: Vec::new(),
            coins: Vec::new(),
            score: 0,
            max_height: 0.0,
            camera_y: 0.0,
            platforms_cleared: 0,
            is_dead: false,
            is_paused: false,
            time_ticks: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_platform_ladder() {
        let mut rng = Mulberry32::new(1);
        let state = GameState::new(1, &mut rng);

        assert_eq!(state.platforms.len(), PLATFORM_COUNT);
        // Index 0 is the fixed start platform
        assert_eq!(state.platforms[0].pos.x, START_PLATFORM_X);
        assert_eq!(state.platforms[0].pos.y, START_PLATFORM_Y);
        assert_eq!(state.platforms[0].width, START_PLATFORM_WIDTH);
        assert!(!state.platforms[0].has_spikes);
        // Evenly spaced upward from there
        for (i, pair) in state.platforms.windows(2).enumerate() {
            assert_eq!(
                pair[1].pos.y,
                START_PLATFORM_Y - PLATFORM_GAP * (i as f32 + 1.0)
            );
        }
    }

    #[test]
    fn test_player_spawns_standing_on_start_platform() {
        let mut rng = Mulberry32::new(5);
        let state = GameState::new(5, &mut rng);

        assert_eq!(state.player.bottom(), START_PLATFORM_Y);
        assert!(state.player.pos.x >= START_PLATFORM_X);
        assert!(state.player.pos.x + PLAYER_SIZE <= state.platforms[0].right());
        assert!(!state.is_dead);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_state_snapshot_roundtrip() {
        let mut rng = Mulberry32::new(77);
        let state = GameState::new(77, &mut rng);
        let json = serde_json::to_string(&state).expect("serialize");
        let back: GameState = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(state, back);
    }
}
