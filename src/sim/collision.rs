//! Collision detection and response for axis-aligned geometry
//!
//! Everything on the playfield is a rectangle: the ball is tested by its
//! bounding box, bricks and the paddle are boxes. Overlap tests are
//! inclusive on every edge, so a ball that just touches a brick hits it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned rectangle in playfield coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            min: Vec2::new(x0, y0),
            max: Vec2::new(x1, y1),
        }
    }

    /// Box of half-size `half` around `center`
    pub fn from_center(center: Vec2, half: Vec2) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Inclusive overlap on both axes
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_x(other) && self.max.y >= other.min.y && self.min.y <= other.max.y
    }

    /// Inclusive overlap of the horizontal extents only
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.max.x >= other.min.x && self.min.x <= other.max.x
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Playfield boundary the ball can bounce off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wall {
    Left,
    Right,
    Top,
}

/// Resolve ball contact with the side and top walls.
///
/// Velocity is forced away from each touched wall and the ball is clamped
/// back onto the boundary (not mirrored by the overshoot). Left and right
/// are exclusive; the top wall is checked independently so a corner hit
/// reports two walls.
pub fn resolve_walls(pos: &mut Vec2, vel: &mut Vec2, radius: f32) -> Vec<Wall> {
    let mut hits = Vec::new();

    if pos.x - radius <= 0.0 {
        vel.x = vel.x.abs();
        pos.x = radius;
        hits.push(Wall::Left);
    } else if pos.x + radius >= PLAYFIELD_WIDTH {
        vel.x = -vel.x.abs();
        pos.x = PLAYFIELD_WIDTH - radius;
        hits.push(Wall::Right);
    }

    if pos.y - radius <= 0.0 {
        vel.y = vel.y.abs();
        pos.y = radius;
        hits.push(Wall::Top);
    }

    hits
}

/// Whether a ball box moving with `vel` lands on the paddle's top edge this tick
pub fn hits_paddle_top(ball: &Rect, vel: Vec2, paddle: &Rect) -> bool {
    vel.y > 0.0
        && ball.max.y >= paddle.min.y
        && ball.min.y < paddle.min.y
        && ball.overlaps_x(paddle)
}

/// Whether a brick hit should flip the vertical velocity (top/bottom face)
/// rather than the horizontal one (side face)
pub fn brick_hit_is_vertical(ball: &Rect, vel: Vec2, brick: &Rect) -> bool {
    (ball.min.y <= brick.min.y && vel.y > 0.0) || (ball.max.y >= brick.max.y && vel.y < 0.0)
}

/// Whether the ball's bottom edge has crossed the floor
#[inline]
pub fn crossed_floor(ball: &Rect) -> bool {
    ball.max.y >= PLAYFIELD_HEIGHT
}
