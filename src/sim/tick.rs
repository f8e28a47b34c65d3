//! Fixed timestep simulation tick
//!
//! One authoritative update per call, always in the same step order:
//! control, gravity, platform landing, enemy contact, enemy patrol,
//! coins, camera scroll, world recycling, fall death. The order is part
//! of the determinism contract - collision outcomes and PRNG draws both
//! depend on it.

use std::collections::HashSet;

use super::collision;
use super::rng::Mulberry32;
use super::state::{GameState, TickEvents};
use super::worldgen;
use crate::consts::*;

/// Keys that steer left / right. Both arrow and letter bindings count.
const LEFT_KEYS: [&str; 3] = ["ArrowLeft", "a", "A"];
const RIGHT_KEYS: [&str; 3] = ["ArrowRight", "d", "D"];

/// The set of currently held keys, fed to every tick.
///
/// Membership-only: nothing iterates it, so set ordering can never leak
/// into the simulation.
#[derive(Debug, Clone, Default)]
pub struct ActiveKeys {
    keys: HashSet<String>,
}

impl ActiveKeys {
    /// Mark a key held. Returns false if it already was.
    pub fn insert(&mut self, key: &str) -> bool {
        self.keys.insert(key.to_string())
    }

    /// Mark a key released. Returns false if it wasn't held.
    pub fn remove(&mut self, key: &str) -> bool {
        self.keys.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn left_held(&self) -> bool {
        LEFT_KEYS.iter().any(|k| self.keys.contains(*k))
    }

    pub fn right_held(&self) -> bool {
        RIGHT_KEYS.iter().any(|k| self.keys.contains(*k))
    }
}

/// Advance the game state by one tick.
///
/// Reads the held-key set and the session RNG; mutates `state` in place.
/// The returned events are observational (presentation hooks) - the
/// mutated state is the only authoritative output. Paused and dead
/// states are a guaranteed no-op.
pub fn simulate_tick(
    state: &mut GameState,
    keys: &ActiveKeys,
    rng: &mut Mulberry32,
) -> TickEvents {
    let mut events = TickEvents::default();
    if state.is_dead || state.is_paused {
        return events;
    }
    state.time_ticks += 1;

    // Horizontal control. Right is checked last and wins when both
    // directions are held.
    let left = keys.left_held();
    let right = keys.right_held();
    if left {
        state.player.vel.x = -MOVE_SPEED;
        state.player.facing_right = false;
    }
    if right {
        state.player.vel.x = MOVE_SPEED;
        state.player.facing_right = true;
    }
    if !left && !right {
        state.player.vel.x *= FRICTION;
    }
    state.player.pos.x += state.player.vel.x;

    // Wrap at the screen edges
    if state.player.pos.x > SCREEN_WIDTH {
        state.player.pos.x = -PLAYER_SIZE;
    } else if state.player.pos.x + PLAYER_SIZE < 0.0 {
        state.player.pos.x = SCREEN_WIDTH;
    }

    // Gravity
    state.player.vel.y += GRAVITY;
    state.player.pos.y += state.player.vel.y;

    // Platform landing, only while falling. Every platform is evaluated;
    // the last overlapping one wins positionally. A spike landing ends
    // the tick immediately.
    if state.player.vel.y >= 0.0 {
        for platform in &state.platforms {
            if collision::landing_hit(&state.player, platform) {
                if collision::spike_hit(&state.player, platform) {
                    state.is_dead = true;
                    events.died = true;
                    return events;
                }
                state.player.pos.y = platform.pos.y - PLAYER_SIZE;
                state.player.vel.y = BOUNCE_VELOCITY;
                events.jumped = true;
            }
        }
    }

    // Enemy contact is instant death
    for enemy in &state.enemies {
        if collision::enemy_hit(&state.player, enemy) {
            state.is_dead = true;
            events.died = true;
            return events;
        }
    }

    // Enemy patrol: reflect at the parent platform's edges, not the screen's
    for enemy in &mut state.enemies {
        let platform = &state.platforms[enemy.platform_index];
        enemy.pos.x += enemy.direction * ENEMY_SPEED;
        if enemy.pos.x < platform.pos.x {
            enemy.pos.x = platform.pos.x;
            enemy.direction = 1.0;
        } else if enemy.pos.x + ENEMY_SIZE > platform.right() {
            enemy.pos.x = platform.right() - ENEMY_SIZE;
            enemy.direction = -1.0;
        }
    }

    // Coin collection
    for coin in &mut state.coins {
        if !coin.collected && collision::coin_hit(&state.player, coin) {
            coin.collected = true;
            state.score += COIN_SCORE;
            events.coins_collected += 1;
            events.score_changed = true;
        }
    }

    // Camera scroll: the player never climbs above the threshold line on
    // screen - the world shifts down instead. Height score comes from the
    // max_height high-water mark, so falling never refunds it.
    if state.player.pos.y < CAMERA_THRESHOLD {
        let excess = CAMERA_THRESHOLD - state.player.pos.y;
        state.player.pos.y = CAMERA_THRESHOLD;
        for platform in &mut state.platforms {
            platform.pos.y += excess;
        }
        for enemy in &mut state.enemies {
            enemy.pos.y += excess;
        }
        for coin in &mut state.coins {
            coin.pos.y += excess;
        }
        state.camera_y += excess;

        let old_units = (state.max_height / HEIGHT_UNIT) as u64;
        state.max_height += excess;
        let new_units = (state.max_height / HEIGHT_UNIT) as u64;
        if new_units > old_units {
            state.score += (new_units - old_units) * HEIGHT_UNIT_SCORE;
            events.score_changed = true;
        }
    }

    // World recycling: drop platforms that scrolled out the bottom,
    // re-index enemy back-references, then top the ladder back up.
    while state
        .platforms
        .first()
        .is_some_and(|p| p.pos.y > SCREEN_HEIGHT)
    {
        state.platforms.remove(0);
        state.platforms_cleared += 1;
        state.enemies.retain(|e| e.platform_index != 0);
        for enemy in &mut state.enemies {
            enemy.platform_index -= 1;
        }
    }
    state
        .coins
        .retain(|c| !c.collected && c.pos.y <= SCREEN_HEIGHT);
    while state.platforms.len() < PLATFORM_COUNT {
        let Some(top) = state.platforms.last() else {
            break;
        };
        let y = top.pos.y - PLATFORM_GAP;
        let platform = worldgen::generate_platform(y, state.platforms_cleared, rng);
        if worldgen::should_spawn_enemy(state.platforms_cleared, rng) {
            state
                .enemies
                .push(worldgen::spawn_enemy_on(&platform, state.platforms.len()));
        }
        if worldgen::should_spawn_coin(rng) {
            state.coins.push(worldgen::spawn_coin_above(&platform));
        }
        state.platforms.push(platform);
    }

    // Fall death
    if state.player.pos.y > SCREEN_HEIGHT + FALL_MARGIN {
        state.is_dead = true;
        events.died = true;
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Coin, Enemy, Platform};
    use glam::Vec2;

    fn new_game(seed: i32) -> (GameState, Mulberry32) {
        let mut rng = Mulberry32::from_seed(seed);
        let state = GameState::new(seed, &mut rng);
        (state, rng)
    }

    fn held(keys: &[&str]) -> ActiveKeys {
        let mut set = ActiveKeys::default();
        for k in keys {
            set.insert(k);
        }
        set
    }

    #[test]
    fn test_paused_tick_is_noop() {
        let (mut state, mut rng) = new_game(11);
        state.is_paused = true;
        let snapshot = state.clone();
        let rng_before = rng.state();

        let events = simulate_tick(&mut state, &held(&["ArrowRight"]), &mut rng);
        assert_eq!(events, TickEvents::default());
        assert_eq!(state, snapshot);
        assert_eq!(rng.state(), rng_before);
    }

    #[test]
    fn test_dead_state_is_terminal() {
        let (mut state, mut rng) = new_game(11);
        state.is_dead = true;
        let snapshot = state.clone();

        let events = simulate_tick(&mut state, &ActiveKeys::default(), &mut rng);
        assert_eq!(events, TickEvents::default());
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_first_tick_bounces_off_start_platform() {
        let (mut state, mut rng) = new_game(3);
        let events = simulate_tick(&mut state, &ActiveKeys::default(), &mut rng);
        assert!(events.jumped);
        assert_eq!(state.player.vel.y, BOUNCE_VELOCITY);
        assert_eq!(state.player.bottom(), START_PLATFORM_Y);
    }

    #[test]
    fn test_right_wins_when_both_held() {
        let (mut state, mut rng) = new_game(3);
        simulate_tick(&mut state, &held(&["ArrowLeft", "ArrowRight"]), &mut rng);
        assert_eq!(state.player.vel.x, MOVE_SPEED);
        assert!(state.player.facing_right);
    }

    #[test]
    fn test_friction_decays_velocity_when_idle() {
        let (mut state, mut rng) = new_game(3);
        simulate_tick(&mut state, &held(&["d"]), &mut rng);
        assert_eq!(state.player.vel.x, MOVE_SPEED);
        simulate_tick(&mut state, &ActiveKeys::default(), &mut rng);
        assert_eq!(state.player.vel.x, MOVE_SPEED * FRICTION);
    }

    #[test]
    fn test_screen_wrap() {
        let (mut state, mut rng) = new_game(3);
        state.player.pos.x = SCREEN_WIDTH - 2.0;
        simulate_tick(&mut state, &held(&["ArrowRight"]), &mut rng);
        assert_eq!(state.player.pos.x, -PLAYER_SIZE);

        state.player.pos.x = -PLAYER_SIZE + 2.0;
        simulate_tick(&mut state, &held(&["ArrowLeft"]), &mut rng);
        assert_eq!(state.player.pos.x, SCREEN_WIDTH);
    }

    #[test]
    fn test_spike_landing_kills() {
        let (mut state, mut rng) = new_game(3);
        // Put a spike strip directly under the spawn point
        state.platforms[0].has_spikes = true;
        state.platforms[0].spike_offset_x =
            state.player.pos.x - state.platforms[0].pos.x;

        let events = simulate_tick(&mut state, &ActiveKeys::default(), &mut rng);
        assert!(events.died);
        assert!(!events.jumped);
        assert!(state.is_dead);
    }

    #[test]
    fn test_enemy_contact_kills() {
        let (mut state, mut rng) = new_game(3);
        state.enemies.push(Enemy {
            pos: state.player.pos,
            direction: 1.0,
            platform_index: 0,
        });
        let events = simulate_tick(&mut state, &ActiveKeys::default(), &mut rng);
        assert!(events.died);
        assert!(state.is_dead);
    }

    #[test]
    fn test_enemy_patrol_reflects_at_platform_edges() {
        let (mut state, mut rng) = new_game(3);
        state.platforms[1] = Platform {
            pos: Vec2::new(100.0, 300.0),
            width: 60.0,
            has_spikes: false,
            spike_offset_x: 0.0,
        };
        state.enemies.push(Enemy {
            pos: Vec2::new(131.0, 300.0 - ENEMY_SIZE),
            direction: 1.0,
            platform_index: 1,
        });

        simulate_tick(&mut state, &ActiveKeys::default(), &mut rng);
        let enemy = &state.enemies[0];
        // 131 + 1.5 overshoots the right edge (160 - 28 = 132): clamped,
        // direction flipped
        assert_eq!(enemy.pos.x, 132.0);
        assert_eq!(enemy.direction, -1.0);
    }

    #[test]
    fn test_coin_never_awards_twice() {
        let (mut state, mut rng) = new_game(3);
        state.coins.push(Coin {
            pos: state.player.pos,
            collected: false,
        });

        let events = simulate_tick(&mut state, &ActiveKeys::default(), &mut rng);
        assert_eq!(events.coins_collected, 1);
        assert_eq!(state.score, COIN_SCORE);
        // Collected coins are swept out the same tick
        assert!(state.coins.is_empty());

        let events = simulate_tick(&mut state, &ActiveKeys::default(), &mut rng);
        assert_eq!(events.coins_collected, 0);
        assert_eq!(state.score, COIN_SCORE);
    }

    #[test]
    fn test_determinism() {
        let (mut a, mut rng_a) = new_game(99_999);
        let (mut b, mut rng_b) = new_game(99_999);

        for t in 0..300u32 {
            let keys = match (t / 25) % 3 {
                0 => held(&["ArrowRight"]),
                1 => held(&["ArrowLeft"]),
                _ => ActiveKeys::default(),
            };
            simulate_tick(&mut a, &keys, &mut rng_a);
            simulate_tick(&mut b, &keys, &mut rng_b);
            assert_eq!(a, b);
            assert_eq!(rng_a.state(), rng_b.state());
            if a.is_dead {
                break;
            }
        }
    }

    #[test]
    fn test_tick_invariants_hold_across_runs() {
        for seed in [1, 42, 7, 8_675_309, -12_345] {
            let (mut state, mut rng) = new_game(seed);
            let mut last_score = 0;
            for t in 0..600u32 {
                let keys = if (t / 20) % 2 == 0 {
                    held(&["ArrowRight"])
                } else {
                    held(&["a"])
                };
                simulate_tick(&mut state, &keys, &mut rng);
                assert_eq!(state.platforms.len(), PLATFORM_COUNT);
                assert!(state.score >= last_score);
                last_score = state.score;
                for enemy in &state.enemies {
                    assert!(enemy.platform_index < state.platforms.len());
                }
                if state.is_dead {
                    break;
                }
            }
        }
    }
}
