//! Collision detection for the simulation
//!
//! Everything is axis-aligned boxes in screen space. Landing is a
//! one-sided test: only the platform's top edge matters, and only while
//! the player is falling, so jumps pass through platforms from below.

use glam::Vec2;

use super::state::{Coin, Enemy, Platform, Player};
use crate::consts::*;

/// Horizontal interval overlap between `[ax, ax+aw)` and `[bx, bx+bw)`.
#[inline]
pub fn overlap_x(ax: f32, aw: f32, bx: f32, bw: f32) -> bool {
    ax < bx + bw && ax + aw > bx
}

/// Full AABB overlap; positions are top-left corners.
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}

/// Landing test: the player's bottom edge sits inside the tolerance band
/// below the platform top, with horizontal overlap. Caller guarantees the
/// player is falling; the band is shallower than one tick of terminal
/// fall, so a fast drop can pass straight through (that miss is the
/// game's fall-death mechanic, not a bug).
pub fn landing_hit(player: &Player, platform: &Platform) -> bool {
    let bottom = player.bottom();
    overlap_x(player.pos.x, PLAYER_SIZE, platform.pos.x, platform.width)
        && bottom >= platform.pos.y
        && bottom < platform.pos.y + LANDING_TOLERANCE
}

/// Whether a landing on this platform comes down on the spike strip.
pub fn spike_hit(player: &Player, platform: &Platform) -> bool {
    platform.has_spikes && overlap_x(player.pos.x, PLAYER_SIZE, platform.spike_x(), SPIKE_WIDTH)
}

pub fn enemy_hit(player: &Player, enemy: &Enemy) -> bool {
    aabb_overlap(
        player.pos,
        Vec2::splat(PLAYER_SIZE),
        enemy.pos,
        Vec2::splat(ENEMY_SIZE),
    )
}

pub fn coin_hit(player: &Player, coin: &Coin) -> bool {
    aabb_overlap(
        player.pos,
        Vec2::splat(PLAYER_SIZE),
        coin.pos,
        Vec2::splat(COIN_SIZE),
    )
}
