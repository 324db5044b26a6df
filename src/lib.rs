//! Sky Volley - A vertically scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pools, collisions, run state)
//! - `game`: Frame driver wiring the simulation to its collaborators
//! - `audio`: Sound cue sinks (Web Audio in the browser)
//! - `persistence`: Progress snapshots and stores
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;
pub mod view;

pub use game::Game;
pub use input::{HostCommand, TickInput};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical playfield size (CSS pixels)
    pub const PLAYFIELD_WIDTH: f32 = 480.0;
    pub const PLAYFIELD_HEIGHT: f32 = 640.0;

    /// Largest step the simulation will take in one frame (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// Score needed within a level to complete it
    pub const LEVEL_SCORE_TARGET: u64 = 500;
    pub const STARTING_LIVES: u32 = 3;

    /// Pool capacities
    pub const BULLET_POOL_SIZE: usize = 50;
    pub const ENEMY_POOL_SIZE: usize = 30;
    pub const PICKUP_POOL_SIZE: usize = 10;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 300.0;
    /// Seconds between shots
    pub const PLAYER_FIRE_INTERVAL: f32 = 0.15;
    /// Post-hit damage immunity (seconds)
    pub const INVINCIBILITY_SECS: f32 = 1.0;
    /// Blink toggles per second while invincible
    pub const BLINK_RATE_HZ: f32 = 5.0;

    /// Bullet defaults
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 12.0;
    pub const BULLET_SPEED: f32 = 600.0;
    pub const BULLET_DAMAGE: u32 = 1;
    /// Horizontal offset of the extra rapid-fire bullets
    pub const RAPID_FIRE_SPREAD: f32 = 12.0;

    /// Power-up pickups
    pub const PICKUP_SIZE: f32 = 22.0;
    pub const PICKUP_SPEED: f32 = 80.0;
    pub const DROP_CHANCE: f64 = 0.3;
}
