//! Headless replay verification
//!
//! `replay_game` re-executes a run from its seed and recorded event log
//! and reports the score the simulation actually produces. It is a pure
//! function over its inputs: no I/O, no shared state, fresh RNG and game
//! state per call, so any number of verifications can run concurrently.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_GAME_TICKS;
use crate::recorder::{InputEvent, is_allowed_key};
use crate::sim::{ActiveKeys, GameState, Mulberry32, simulate_tick};

/// Result of replaying a run headlessly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayOutcome {
    /// Score the simulation produced from the evidence
    pub score: u64,
    /// Ticks executed before death or the ceiling
    pub total_ticks: u64,
    /// False means the tick ceiling was reached - a normal boundary
    /// outcome, not an error
    pub is_dead: bool,
}

/// Replay a run and recompute its score.
///
/// Events are stable-sorted by tick first, so out-of-order submissions
/// are tolerated. Unknown keys are dropped, matching the recorder's
/// allow-list filtering. The loop is capped at `MAX_GAME_TICKS` so a
/// maliciously long log cannot buy unbounded server time.
pub fn replay_game(seed: i32, events: &[InputEvent]) -> ReplayOutcome {
    let mut ordered: Vec<&InputEvent> = events.iter().collect();
    ordered.sort_by_key(|e| e.tick);

    let mut rng = Mulberry32::from_seed(seed);
    let mut state = GameState::new(seed, &mut rng);
    let mut keys = ActiveKeys::default();

    let mut next = 0;
    let mut total_ticks = 0;
    for tick in 0..MAX_GAME_TICKS {
        while next < ordered.len() && ordered[next].tick == tick {
            let event = ordered[next];
            if is_allowed_key(&event.key) {
                if event.pressed {
                    keys.insert(&event.key);
                } else {
                    keys.remove(&event.key);
                }
            }
            next += 1;
        }

        simulate_tick(&mut state, &keys, &mut rng);
        total_ticks = tick + 1;
        if state.is_dead {
            break;
        }
    }

    ReplayOutcome {
        score: state.score,
        total_ticks,
        is_dead: state.is_dead,
    }
}

/// Errors reading or writing a recorded-run file.
#[derive(Debug, Error)]
pub enum RunLogError {
    #[error("failed to read run log: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed run log: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The wire envelope a client submits for scoring: the complete evidence
/// for one run, plus an advisory claimed score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedRun {
    /// Session this run belongs to, when issued by the bootstrap service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub seed: i32,
    /// Client-claimed score; advisory only, never trusted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_score: Option<u64>,
    pub events: Vec<InputEvent>,
}

impl RecordedRun {
    /// Replay this run's evidence.
    pub fn verify(&self) -> ReplayOutcome {
        replay_game(self.seed, &self.events)
    }

    pub fn from_json(json: &str) -> Result<Self, RunLogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, RunLogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, RunLogError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), RunLogError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
