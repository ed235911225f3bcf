//! Axis-aligned collision checks
//!
//! Screen coordinates: x grows right, y grows down. Edges that merely touch do
//! not overlap.

use glam::Vec2;

use super::state::{Bird, Pipe};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box from its top-left corner and size
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// True when there is no separating gap on either axis
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// What the bird ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    Ground,
    Ceiling,
    Pipe,
}

/// Bird bottom below the ground line, bird top above the screen, or any
/// pipe overlap. Bounds are checked first.
pub fn bird_collision(bird: &Bird, pipes: &[Pipe], ground_line: f32) -> Option<CollisionKind> {
    let bird_box = bird.aabb();

    if bird_box.max.y > ground_line {
        return Some(CollisionKind::Ground);
    }
    if bird_box.min.y < 0.0 {
        return Some(CollisionKind::Ceiling);
    }

    pipes
        .iter()
        .any(|pipe| bird_box.overlaps(&pipe.aabb()))
        .then_some(CollisionKind::Pipe)
}
