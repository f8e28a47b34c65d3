//! Skyhop - a vertical-hopper arcade game with server-verifiable replays
//!
//! The run executes on an untrusted client; the server only ever sees a
//! seed and a tick-tagged key-event log, and re-executes the simulation
//! from that evidence to recompute the score.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world generation, physics, scoring)
//! - `recorder`: Tick-tagged recording of allow-listed key transitions
//! - `replay`: Headless replay verification of recorded runs
//! - `scoreboard`: Score submission backed by replay verification
//! - `session`: Session issuance and the per-session game bundle
//! - `driver`: Fixed-timestep accumulator for external game loops

pub mod driver;
pub mod recorder;
pub mod replay;
pub mod scoreboard;
pub mod session;
pub mod sim;

pub use recorder::{InputEvent, InputRecorder};
pub use replay::{RecordedRun, ReplayOutcome, replay_game};
pub use scoreboard::Scoreboard;
pub use session::{GameSession, Session};

/// Game configuration constants
pub mod consts {
    /// Logical tick rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Hard ceiling on replayed ticks (bounds worst-case server replay cost)
    pub const MAX_GAME_TICKS: u64 = 36_000;

    /// Viewport dimensions (screen-space pixels, y grows downward)
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Number of live platforms after every completed tick
    pub const PLATFORM_COUNT: usize = 8;
    /// Vertical spacing between consecutive platforms
    pub const PLATFORM_GAP: f32 = 80.0;
    pub const PLATFORM_WIDTH_MIN: f32 = 60.0;
    pub const PLATFORM_WIDTH_MAX: f32 = 100.0;
    pub const PLATFORM_HEIGHT: f32 = 14.0;
    /// The fixed start platform every run begins on
    pub const START_PLATFORM_X: f32 = 20.0;
    pub const START_PLATFORM_Y: f32 = 550.0;
    pub const START_PLATFORM_WIDTH: f32 = 100.0;

    /// Player AABB is a square of this side
    pub const PLAYER_SIZE: f32 = 30.0;
    /// Horizontal speed while a direction key is held
    pub const MOVE_SPEED: f32 = 5.0;
    /// Multiplicative horizontal decay per tick with no key held
    pub const FRICTION: f32 = 0.85;
    pub const GRAVITY: f32 = 0.5;
    /// Upward impulse applied on every platform landing
    pub const BOUNCE_VELOCITY: f32 = -12.8;
    /// Depth of the band below a platform top that still counts as a landing
    pub const LANDING_TOLERANCE: f32 = 10.0;

    /// Spike strip width (the strip sits on the platform top)
    pub const SPIKE_WIDTH: f32 = 24.0;
    pub const ENEMY_SIZE: f32 = 28.0;
    pub const ENEMY_SPEED: f32 = 1.5;

    pub const COIN_SIZE: f32 = 18.0;
    /// How far above its platform a coin hovers
    pub const COIN_HOVER: f32 = 40.0;
    pub const COIN_SCORE: u64 = 50;

    /// Player screen-space y is pinned to this line while climbing (40% of viewport)
    pub const CAMERA_THRESHOLD: f32 = 240.0;
    /// One scored unit of climb (a platform's worth of height)
    pub const HEIGHT_UNIT: f32 = 80.0;
    pub const HEIGHT_UNIT_SCORE: u64 = 10;
    /// How far below the viewport the player may fall before dying
    pub const FALL_MARGIN: f32 = 60.0;
}
