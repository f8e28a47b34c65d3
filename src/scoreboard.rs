//! Score submission and leaderboard
//!
//! The scoring collaborator never trusts the client: every submission is
//! replayed from its evidence and the replayed score is authoritative. A
//! claimed score that disagrees is logged and flagged, but the accepted
//! value is always the replay's.
//!
//! The top-10 leaderboard persists as a JSON file; a missing or corrupt
//! file falls back to a fresh board.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::replay::{RecordedRun, replay_game};

/// Maximum number of leaderboard entries to keep
pub const MAX_LEADERBOARD_ENTRIES: usize = 10;

#[derive(Debug, Error)]
pub enum ScoreboardError {
    #[error("failed to write leaderboard: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode leaderboard: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A single leaderboard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    /// Replay-verified score
    pub score: u64,
    /// Run length in ticks
    pub ticks: u64,
    pub seed: i32,
}

/// Result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// The score that counts - always the replayed value
    pub accepted_score: u64,
    pub total_ticks: u64,
    pub is_dead: bool,
    /// The claimed score disagreed with the replay
    pub claim_mismatch: bool,
    /// Leaderboard rank achieved (1-indexed), if the score qualified
    pub rank: Option<usize>,
}

/// Replay-verifying scoreboard with a top-10 leaderboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub entries: Vec<LeaderboardEntry>,
}

impl Scoreboard {
    /// Create an empty scoreboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Verify a submitted run and record it.
    ///
    /// Replays the evidence, adopts the replayed score, and inserts the
    /// entry if it qualifies for the board.
    pub fn submit(&mut self, name: &str, run: &RecordedRun) -> SubmitOutcome {
        let outcome = replay_game(run.seed, &run.events);

        let claim_mismatch = run
            .claimed_score
            .is_some_and(|claimed| claimed != outcome.score);
        if claim_mismatch {
            log::warn!(
                "claimed score {:?} does not match replayed score {} (seed {}); \
                 accepting the replayed value",
                run.claimed_score,
                outcome.score,
                run.seed,
            );
        }

        let rank = self.add_entry(LeaderboardEntry {
            name: name.to_string(),
            score: outcome.score,
            ticks: outcome.total_ticks,
            seed: run.seed,
        });
        log::info!(
            "accepted run for {}: score {} over {} ticks (rank {:?})",
            name,
            outcome.score,
            outcome.total_ticks,
            rank,
        );

        SubmitOutcome {
            accepted_score: outcome.score,
            total_ticks: outcome.total_ticks,
            is_dead: outcome.is_dead,
            claim_mismatch,
            rank,
        }
    }

    /// Check if a score qualifies for the leaderboard.
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_LEADERBOARD_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Insert an entry, keeping the board sorted descending and trimmed.
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    fn add_entry(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        let score = entry.score;
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_LEADERBOARD_ENTRIES);
        Some(rank)
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load a scoreboard from disk, falling back to a fresh one on any
    /// missing or corrupt file.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Scoreboard>(&json) {
                Ok(board) => {
                    log::info!("loaded {} leaderboard entries", board.entries.len());
                    board
                }
                Err(err) => {
                    log::warn!("corrupt leaderboard file, starting fresh: {err}");
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("no leaderboard found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save the scoreboard to disk.
    pub fn save(&self, path: &Path) -> Result<(), ScoreboardError> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("leaderboard saved ({} entries)", self.entries.len());
        Ok(())
    }
}
