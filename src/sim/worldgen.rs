//! Procedural world generation
//!
//! Platforms, enemies and coins are placed from sequential PRNG draws, so
//! the draw order is part of the engine's wire contract, not a style
//! choice. Per new platform the sequence is:
//!
//!   1. width                 (always)
//!   2. x                     (always)
//!   3. spike presence        (only when difficulty > 2)
//!   4. spike offset          (only when draw 3 hit)
//!   5. enemy presence        (only when difficulty > 3)
//!   6. coin presence         (always)
//!
//! Every gate depends only on the difficulty scalar or an earlier draw,
//! both deterministic, so live play and replay consume identical
//! sequences. Reordering or skipping any draw desynchronizes all
//! randomness after it.

use glam::Vec2;

use super::rng::Mulberry32;
use super::state::{Coin, Enemy, Platform};
use crate::consts::*;

/// Spike probability for a given difficulty (capped at 40%).
fn spike_probability(difficulty: u32) -> f64 {
    (f64::from(difficulty) * 0.05).min(0.4)
}

/// Enemy probability for a given difficulty (capped at 30%).
fn enemy_probability(difficulty: u32) -> f64 {
    (f64::from(difficulty) * 0.04).min(0.3)
}

/// Chance of a coin hovering over any newly generated platform.
const COIN_PROBABILITY: f64 = 0.25;

/// Generate one platform at height `y`.
///
/// `difficulty` is the session's `platforms_cleared` count; spikes only
/// appear once it exceeds 2.
pub fn generate_platform(y: f32, difficulty: u32, rng: &mut Mulberry32) -> Platform {
    let width = rng.range(PLATFORM_WIDTH_MIN, PLATFORM_WIDTH_MAX);
    let x = rng.next_f32() * (SCREEN_WIDTH - width);

    let mut has_spikes = false;
    let mut spike_offset_x = 0.0;
    if difficulty > 2 && rng.chance(spike_probability(difficulty)) {
        has_spikes = true;
        let side = rng.next_f64();
        spike_offset_x = if side < 1.0 / 3.0 {
            0.0
        } else if side < 2.0 / 3.0 {
            (width - SPIKE_WIDTH) / 2.0
        } else {
            width - SPIKE_WIDTH
        };
    }

    Platform {
        pos: Vec2::new(x, y),
        width,
        has_spikes,
        spike_offset_x,
    }
}

/// The fixed start platform plus `PLATFORM_COUNT - 1` platforms spaced
/// evenly above it. Ordered lowest first.
pub fn generate_initial_platforms(rng: &mut Mulberry32) -> Vec<Platform> {
    let mut platforms = Vec::with_capacity(PLATFORM_COUNT);
    platforms.push(Platform {
        pos: Vec2::new(START_PLATFORM_X, START_PLATFORM_Y),
        width: START_PLATFORM_WIDTH,
        has_spikes: false,
        spike_offset_x: 0.0,
    });

    let mut y = START_PLATFORM_Y;
    for _ in 1..PLATFORM_COUNT {
        y -= PLATFORM_GAP;
        platforms.push(generate_platform(y, 0, rng));
    }
    platforms
}

/// Whether a new platform gets a patrolling enemy. No draw is consumed at
/// or below difficulty 3.
pub fn should_spawn_enemy(difficulty: u32, rng: &mut Mulberry32) -> bool {
    difficulty > 3 && rng.chance(enemy_probability(difficulty))
}

/// Whether a new platform gets a coin. Always consumes exactly one draw.
pub fn should_spawn_coin(rng: &mut Mulberry32) -> bool {
    rng.chance(COIN_PROBABILITY)
}

/// Place an enemy centered on the platform top, patrolling right.
pub fn spawn_enemy_on(platform: &Platform, platform_index: usize) -> Enemy {
    Enemy {
        pos: Vec2::new(
            platform.pos.x + platform.width / 2.0 - ENEMY_SIZE / 2.0,
            platform.pos.y - ENEMY_SIZE,
        ),
        direction: 1.0,
        platform_index,
    }
}

/// Place a coin hovering centered above the platform.
pub fn spawn_coin_above(platform: &Platform) -> Coin {
    Coin {
        pos: Vec2::new(
            platform.pos.x + platform.width / 2.0 - COIN_SIZE / 2.0,
            platform.pos.y - COIN_HOVER,
        ),
        collected: false,
    }
}
