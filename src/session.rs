//! Session bootstrap and the per-session game bundle
//!
//! A session is the unit of trust: the bootstrap service mints a random
//! id and seed, and the client plays exactly one run against them. This
//! is the only module that touches real entropy - inside the simulation
//! the seed is the whole world.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::recorder::InputRecorder;
use crate::replay::RecordedRun;
use crate::sim::{GameState, Mulberry32, TickEvents, simulate_tick};

/// A scoring session issued by the bootstrap service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    /// Opaque entropy as far as the client is concerned
    pub seed: i32,
}

impl Session {
    /// Mint a fresh session with a random id and seed.
    pub fn issue() -> Self {
        let mut rng = rand::rng();
        let id = format!("{:08x}-{:08x}", rng.random::<u32>(), rng.random::<u32>());
        let seed = rng.random::<i32>();
        log::debug!("issued session {id} (seed {seed})");
        Self { id, seed }
    }

    /// A session with a fixed seed, for tests and tooling.
    pub fn with_seed(id: &str, seed: i32) -> Self {
        Self {
            id: id.to_string(),
            seed,
        }
    }
}

/// One live run: the unshared (state, RNG, recorder) triple.
///
/// The driver forwards key transitions and calls `advance_tick` at the
/// fixed rate; everything the recorder observes is exactly what the
/// simulation consumes, so the packaged evidence replays to the same run.
#[derive(Debug, Clone)]
pub struct GameSession {
    session: Session,
    state: GameState,
    rng: Mulberry32,
    recorder: InputRecorder,
}

impl GameSession {
    pub fn new(session: Session) -> Self {
        let mut rng = Mulberry32::from_seed(session.seed);
        let state = GameState::new(session.seed, &mut rng);
        Self {
            session,
            state,
            rng,
            recorder: InputRecorder::new(),
        }
    }

    pub fn key_down(&mut self, key: &str) {
        self.recorder.record_key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.recorder.record_key_up(key);
    }

    /// Pause/resume, driven by the external scheduler. Paused ticks
    /// consume no logical time on either side of the verification.
    pub fn set_paused(&mut self, paused: bool) {
        self.state.is_paused = paused;
    }

    /// Run one simulation tick with the currently held keys.
    ///
    /// Paused and finished sessions are a no-op that also freezes the
    /// recorder's tick counter, keeping the log aligned with a replay
    /// that never pauses.
    pub fn advance_tick(&mut self) -> TickEvents {
        if self.state.is_paused || self.state.is_dead {
            return TickEvents::default();
        }
        let events = simulate_tick(&mut self.state, self.recorder.active_keys(), &mut self.rng);
        self.recorder.advance_tick();
        events
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_over(&self) -> bool {
        self.state.is_dead
    }

    /// Package the run's evidence for submission, claiming the live score.
    pub fn finish(&self) -> RecordedRun {
        RecordedRun {
            session_id: Some(self.session.id.clone()),
            seed: self.session.seed,
            claimed_score: Some(self.state.score),
            events: self.recorder.recorded_events(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_GAME_TICKS;
    use crate::replay::replay_game;

    /// Drive a session like a player: scripted holds, tick by tick.
    fn play_scripted(session: Session, max_ticks: u64) -> GameSession {
        let mut game = GameSession::new(session);
        for t in 0..max_ticks {
            match t % 40 {
                0 => game.key_down("ArrowRight"),
                20 => {
                    game.key_up("ArrowRight");
                    game.key_down("a");
                }
                39 => game.key_up("a"),
                _ => {}
            }
            game.advance_tick();
            if game.is_over() {
                break;
            }
        }
        game
    }

    #[test]
    fn test_live_run_replays_to_same_score() {
        let game = play_scripted(Session::with_seed("s-1", 8_675_309), MAX_GAME_TICKS);
        assert!(game.is_over());

        let run = game.finish();
        let outcome = replay_game(run.seed, &run.events);
        assert_eq!(outcome.score, game.state().score);
        assert_eq!(outcome.total_ticks, game.state().time_ticks);
        assert!(outcome.is_dead);
        // An honest client's claim survives verification
        assert_eq!(run.claimed_score, Some(outcome.score));
    }

    #[test]
    fn test_pause_does_not_desync_replay() {
        let mut paused = GameSession::new(Session::with_seed("s-2", 555));
        let mut straight = GameSession::new(Session::with_seed("s-3", 555));

        for t in 0..200u64 {
            if t == 30 {
                paused.key_down("d");
                straight.key_down("d");
            }
            if t == 90 {
                paused.key_up("d");
                straight.key_up("d");
            }
            // The paused session idles for a stretch mid-run
            if t == 50 {
                paused.set_paused(true);
                for _ in 0..500 {
                    paused.advance_tick();
                }
                paused.set_paused(false);
            }
            paused.advance_tick();
            straight.advance_tick();
        }

        assert_eq!(paused.state(), straight.state());
        assert_eq!(
            replay_game(555, &paused.finish().events),
            replay_game(555, &straight.finish().events)
        );
    }

    #[test]
    fn test_issued_sessions_are_distinct() {
        let a = Session::issue();
        let b = Session::issue();
        assert_ne!(a.id, b.id);
    }
}
