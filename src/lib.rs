//! Flappy Edge - a Flappy Bird style browser game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, scoring, game phase)
//! - `tuning`: Data-driven game balance
//! - `input`: Activate-action routing and sound toggle hit regions
//! - `profile`: High score, score history and sound preference
//! - `persistence`: Key/value store backends (LocalStorage on web)
//! - `audio`: Sound cues
//! - `effects`: Executes the events a simulation step returns
//! - `demo`: Headless autopilot runs

pub mod audio;
pub mod demo;
pub mod effects;
pub mod input;
pub mod persistence;
pub mod profile;
pub mod sim;
pub mod tuning;

pub use effects::EffectHandler;
pub use profile::{Profile, ScoreHistory};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions
    pub const SCREEN_WIDTH: f32 = 400.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Height of the ground strip drawn at the bottom of the canvas
    pub const GROUND_HEIGHT: f32 = 10.0;

    /// Bird defaults
    pub const BIRD_X: f32 = 80.0;
    pub const BIRD_WIDTH: f32 = 34.0;
    pub const BIRD_HEIGHT: f32 = 24.0;
    /// Downward acceleration (pixels/frame²)
    pub const GRAVITY: f32 = 0.5;
    /// Velocity set by a flap (pixels/frame, negative is up)
    pub const LIFT: f32 = -8.5;
    /// Rotation per unit of vertical velocity (radians)
    pub const ROTATION_FACTOR: f32 = 0.05;
    pub const MAX_ROTATION: f32 = 0.5;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 70.0;
    pub const PIPE_SPEED: f32 = 3.2;
    pub const PIPE_GAP: f32 = 140.0;
    /// Frames between pipe pair spawns
    pub const PIPE_SPAWN_INTERVAL: u32 = 120;
    /// Top pipe height is drawn uniformly from [MIN, MAX)
    pub const MIN_TOP_HEIGHT: u32 = 60;
    pub const MAX_TOP_HEIGHT: u32 = 340;
    /// Extra vertical room a gap must leave beyond the bird's height
    pub const GAP_CLEARANCE: f32 = 20.0;

    /// Score history length
    pub const MAX_HISTORY: usize = 10;
}
