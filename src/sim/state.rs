//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::tuning::{Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first flap
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, next flap restarts
    GameOver,
}

/// The player's bird
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bird {
    /// Top-left corner (x never changes)
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels/frame, positive is down)
    pub vel: f32,
    /// Cosmetic tilt derived from velocity (radians)
    pub rotation: f32,
}

impl Bird {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.bird_x, tuning.bird_start_y()),
            size: Vec2::new(tuning.bird_width, tuning.bird_height),
            vel: 0.0,
            rotation: 0.0,
        }
    }

    /// Semi-implicit Euler: velocity first, then position
    pub fn integrate(&mut self, gravity: f32) {
        self.vel += gravity;
        self.pos.y += self.vel;
    }

    /// Instant upward impulse; replaces the current velocity
    pub fn flap(&mut self, lift: f32) {
        self.vel = lift;
    }

    pub fn update_rotation(&mut self, factor: f32, max: f32) {
        self.rotation = (self.vel * factor).clamp(-max, max);
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Which half of a pipe pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipeSide {
    Top { counted: bool },
    Bottom,
}

/// A single pipe obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipe {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub side: PipeSide,
}

impl Pipe {
    pub fn right_edge(&self) -> f32 {
        self.pos.x + self.size.x
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn is_top(&self) -> bool {
        matches!(self.side, PipeSide::Top { .. })
    }
}

/// Build a top/bottom pair at `x` with the given top height.
///
/// The bottom pipe starts `gap` below the top pipe and runs to the bottom of
/// the screen, so its height is `screen_height - top_height - gap`.
pub fn pipe_pair(x: f32, top_height: f32, tuning: &Tuning) -> [Pipe; 2] {
    let bottom_y = top_height + tuning.pipe_gap;
    [
        Pipe {
            pos: Vec2::new(x, 0.0),
            size: Vec2::new(tuning.pipe_width, top_height),
            side: PipeSide::Top { counted: false },
        },
        Pipe {
            pos: Vec2::new(x, bottom_y),
            size: Vec2::new(tuning.pipe_width, tuning.screen_height - bottom_y),
            side: PipeSide::Bottom,
        },
    ]
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    /// Seed the pipe generator was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub bird: Bird,
    /// Active pipes, pairs pushed top first
    pub pipes: Vec<Pipe>,
    /// Frames simulated in the current run (drives pipe spawning)
    pub frame_count: u64,
    pub score: u32,
    pub high_score: u32,
    /// The high score was beaten at least once this run
    pub new_high_score: bool,
}

impl GameState {
    /// Create a new session. `high_score` is the persisted best so far.
    ///
    /// Rejects tunings that would stall spawning or draw from an empty range.
    pub fn new(tuning: Tuning, seed: u64, high_score: u32) -> Result<Self, TuningError> {
        tuning.validate()?;
        let phase = if tuning.title_screen {
            GamePhase::Start
        } else {
            GamePhase::Playing
        };
        Ok(Self {
            bird: Bird::new(&tuning),
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase,
            pipes: Vec::new(),
            frame_count: 0,
            score: 0,
            high_score,
            new_high_score: false,
        })
    }

    /// Start a fresh run, keeping the high score and RNG stream
    pub fn reset(&mut self) {
        self.bird = Bird::new(&self.tuning);
        self.pipes.clear();
        self.score = 0;
        self.frame_count = 0;
        self.new_high_score = false;
        self.phase = GamePhase::Playing;
    }

    /// Number of pipe pairs currently on screen
    pub fn pair_count(&self) -> usize {
        self.pipes.iter().filter(|p| p.is_top()).count()
    }
}
