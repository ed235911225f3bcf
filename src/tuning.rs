//! Data-driven game balance
//!
//! Every number the simulation uses lives in [`Tuning`]. The defaults reproduce
//! the classic game feel; [`Tuning::compact`] is the tighter variant with a
//! faster pipe cadence and no title screen.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected tuning values
#[derive(Debug, Error, PartialEq)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(String),

    #[error("failed to read tuning file `{path}`: {reason}")]
    Read { path: String, reason: String },

    #[error("pipe gap {gap} leaves no clearance for a bird {bird_height} tall (need > {required})")]
    GapTooSmall {
        gap: f32,
        bird_height: f32,
        required: f32,
    },

    #[error("top pipe height range [{min}, {max}) is empty")]
    EmptyHeightRange { min: u32, max: u32 },

    #[error("tallest pipe pair ({total}) reaches past the ground line ({ground_line})")]
    PipesBelowGround { total: f32, ground_line: f32 },

    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    #[error("{0} must not be negative")]
    Negative(&'static str),
}

/// Game balance parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub screen_width: f32,
    pub screen_height: f32,
    pub ground_height: f32,

    pub bird_x: f32,
    pub bird_width: f32,
    pub bird_height: f32,
    pub gravity: f32,
    pub lift: f32,
    /// Tilt the bird with its vertical velocity (cosmetic)
    pub rotate_bird: bool,
    /// Radians of tilt per unit of vertical velocity
    pub rotation_factor: f32,
    /// Tilt is clamped to [-max_rotation, max_rotation]
    pub max_rotation: f32,

    pub pipe_width: f32,
    pub pipe_speed: f32,
    pub pipe_gap: f32,
    pub spawn_interval: u32,
    pub min_top_height: u32,
    pub max_top_height: u32,

    /// Wait on a title screen before the first flap
    pub title_screen: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ground_height: GROUND_HEIGHT,

            bird_x: BIRD_X,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            gravity: GRAVITY,
            lift: LIFT,
            rotate_bird: true,
            rotation_factor: ROTATION_FACTOR,
            max_rotation: MAX_ROTATION,

            pipe_width: PIPE_WIDTH,
            pipe_speed: PIPE_SPEED,
            pipe_gap: PIPE_GAP,
            spawn_interval: PIPE_SPAWN_INTERVAL,
            min_top_height: MIN_TOP_HEIGHT,
            max_top_height: MAX_TOP_HEIGHT,

            title_screen: true,
        }
    }
}

impl Tuning {
    /// Faster cadence, narrower gap, no rotation or title screen
    pub fn compact() -> Self {
        Self {
            rotate_bird: false,
            pipe_gap: 120.0,
            spawn_interval: 90,
            title_screen: false,
            ..Self::default()
        }
    }

    /// Parse from JSON; missing fields take their default values
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Y coordinate of the top of the ground strip
    pub fn ground_line(&self) -> f32 {
        self.screen_height - self.ground_height
    }

    /// Bird y at the start of a run (vertically centered)
    pub fn bird_start_y(&self) -> f32 {
        self.screen_height / 2.0
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.spawn_interval == 0 {
            return Err(TuningError::NotPositive("spawn_interval"));
        }
        if self.pipe_speed <= 0.0 {
            return Err(TuningError::NotPositive("pipe_speed"));
        }
        if self.pipe_width <= 0.0 {
            return Err(TuningError::NotPositive("pipe_width"));
        }
        if self.max_rotation.is_nan() || self.max_rotation < 0.0 {
            return Err(TuningError::Negative("max_rotation"));
        }

        let required = self.bird_height + GAP_CLEARANCE;
        if self.pipe_gap <= required {
            return Err(TuningError::GapTooSmall {
                gap: self.pipe_gap,
                bird_height: self.bird_height,
                required,
            });
        }

        if self.min_top_height >= self.max_top_height {
            return Err(TuningError::EmptyHeightRange {
                min: self.min_top_height,
                max: self.max_top_height,
            });
        }

        // Largest drawable top height is max - 1
        let total = (self.max_top_height - 1) as f32 + self.pipe_gap;
        if total > self.ground_line() {
            return Err(TuningError::PipesBelowGround {
                total,
                ground_line: self.ground_line(),
            });
        }

        Ok(())
    }
}
