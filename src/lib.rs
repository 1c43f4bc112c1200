//! Barnyard Dash - a dodge-and-collect arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `session`: Drives the simulation and the high-score cell
//! - `renderer`: HUD formatting and the browser canvas renderer
//! - `platform`: Browser/native input abstraction
//! - `persistence`: Key-value storage (LocalStorage on web)

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use session::Session;
pub use settings::Settings;
pub use tuning::{ConfigError, JumpMode, ShieldPolicy, SpawnCadence, Tuning};

/// Game configuration constants
pub mod consts {
    /// Ticks per second the browser frame callback is expected to fire at
    pub const TICK_RATE: u32 = 60;

    /// Lives at the start of every run
    pub const STARTING_LIVES: u8 = 3;
    /// Score for collecting a coin
    pub const COIN_REWARD: u64 = 10;
    /// Score for an obstacle leaving the arena untouched
    pub const DODGE_REWARD: u64 = 5;

    /// Player size as a fraction of the arena
    pub const PLAYER_SCALE: f32 = 0.1;
    /// Gap kept between the player and the floor at spawn
    pub const PLAYER_FLOOR_GAP: f32 = 10.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const GRAVITY: f32 = 0.3;
    /// Upward velocity while jumping (negative is up)
    pub const LIFT: f32 = -5.0;
    pub const MAX_FALL_SPEED: f32 = 10.0;

    /// Entities enter just above the top edge
    pub const SPAWN_Y: f32 = -20.0;
    /// Slowest fall speed a tuning may ask for
    pub const MIN_FALL_SPEED: f32 = 0.1;

    pub const OBSTACLE_MIN_WIDTH: f32 = 62.5;
    pub const OBSTACLE_MAX_WIDTH: f32 = 100.0;
    pub const OBSTACLE_HEIGHT: f32 = 62.5;
    pub const OBSTACLE_BASE_SPEED: f32 = 1.5;
    /// Fall speed gained per point of score (+1 every 100 points)
    pub const OBSTACLE_SPEED_PER_POINT: f32 = 0.01;
    pub const OBSTACLE_MAX_SPEED: f32 = 12.0;

    pub const COIN_RADIUS: f32 = 25.0;
    pub const COIN_SPEED: f32 = 2.0;

    pub const POWER_UP_SIZE: f32 = 40.0;
    pub const POWER_UP_SPEED: f32 = 2.0;

    pub const SPEED_BOOST_FACTOR: f32 = 1.5;
    /// Power-up effect duration (5 seconds)
    pub const EFFECT_DURATION_TICKS: u32 = 5 * TICK_RATE;
}
