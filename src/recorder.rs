//! Tick-tagged input recording
//!
//! The recorder observes the same key transitions the simulation consumes
//! and logs them against the logical tick counter. The log plus the
//! session seed is the complete evidence the server needs to re-execute
//! the run.
//!
//! Filtering rules:
//! - Keys outside the allow-list are dropped silently
//! - A key-down for an already-held key is dropped (OS key repeat)
//! - A key-up for a key that isn't held is dropped

use serde::{Deserialize, Serialize};

use crate::sim::ActiveKeys;

/// The only keys that ever enter a recording.
pub const ALLOWED_KEYS: [&str; 9] = [
    "ArrowLeft",
    "ArrowRight",
    "ArrowUp",
    "ArrowDown",
    "a",
    "A",
    "d",
    "D",
    " ",
];

/// Whether a key name is on the recording allow-list.
pub fn is_allowed_key(key: &str) -> bool {
    ALLOWED_KEYS.contains(&key)
}

/// One recorded key transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Tick the transition applies to (processed before that tick runs)
    pub tick: u64,
    pub key: String,
    pub pressed: bool,
}

/// Records allow-listed key transitions tagged with the tick counter.
#[derive(Debug, Clone, Default)]
pub struct InputRecorder {
    events: Vec<InputEvent>,
    active: ActiveKeys,
    tick: u64,
}

impl InputRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Repeats and unknown keys are ignored.
    pub fn record_key_down(&mut self, key: &str) {
        if !is_allowed_key(key) {
            return;
        }
        if !self.active.insert(key) {
            return;
        }
        self.events.push(InputEvent {
            tick: self.tick,
            key: key.to_string(),
            pressed: true,
        });
    }

    /// Record a key release. Ignored unless the key is currently held.
    pub fn record_key_up(&mut self, key: &str) {
        if !self.active.remove(key) {
            return;
        }
        self.events.push(InputEvent {
            tick: self.tick,
            key: key.to_string(),
            pressed: false,
        });
    }

    /// Advance the tick counter. Call once per simulated tick, after the
    /// tick has run - never per rendered frame, and never for paused ticks.
    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }

    /// The currently held keys, exactly as the simulation should see them.
    pub fn active_keys(&self) -> &ActiveKeys {
        &self.active
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    /// A copy of the full event log.
    pub fn recorded_events(&self) -> Vec<InputEvent> {
        self.events.clone()
    }

    /// Clear log, tick counter, and held keys for a new session.
    pub fn reset(&mut self) {
        self.events.clear();
        self.active.clear();
        self.tick = 0;
    }
}
