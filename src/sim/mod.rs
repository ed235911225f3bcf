//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per animation frame
//! - Seeded RNG only
//! - Side effects returned as events, never performed
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionKind, bird_collision};
pub use state::{Bird, GamePhase, GameState, Pipe, PipeSide, pipe_pair};
pub use tick::{GameEvent, TickInput, flap, spawn_pipe_pair, tick};
