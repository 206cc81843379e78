//! Collision detection and response for axis-aligned geometry
//!
//! Bricks, the paddle and power-ups are axis-aligned rectangles; the ball is
//! a circle. Coordinates are screen-space: x grows right, y grows down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.size / 2.0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.half_extents()
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }
}

/// Compass direction of a circle-box contact.
///
/// Names the side of the box the ball is on, i.e. the direction pointing
/// from the contact point toward the ball center. Declaration order is the
/// tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit vector in screen space (up is negative y)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// A circle-box hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    pub direction: Direction,
    /// Vector from the closest point on the box to the ball center
    pub penetration: Vec2,
}

/// AABB-AABB overlap on closed intervals (touching counts)
pub fn check_aabb(a: &Aabb, b: &Aabb) -> bool {
    let a_max = a.max();
    let b_max = b.max();
    let overlap_x = a_max.x >= b.pos.x && b_max.x >= a.pos.x;
    let overlap_y = a_max.y >= b.pos.y && b_max.y >= a.pos.y;
    overlap_x && overlap_y
}

/// Circle-AABB test.
///
/// The closest point on the box is found by clamping the center offset into
/// the half-extents. A hit needs the distance to be strictly less than the
/// radius, so a ball resolved to exactly touching does not re-trigger.
pub fn check_circle_aabb(center: Vec2, radius: f32, aabb: &Aabb) -> Option<CollisionInfo> {
    let half = aabb.half_extents();
    let box_center = aabb.center();
    let offset = center - box_center;
    let closest = box_center + offset.clamp(-half, half);
    let difference = center - closest;

    if difference.length() < radius {
        // Center inside the box: classify by the offset from the box center
        let direction = if difference == Vec2::ZERO {
            vector_direction(offset)
        } else {
            vector_direction(difference)
        };
        Some(CollisionInfo {
            direction,
            penetration: difference,
        })
    } else {
        None
    }
}

/// Compass direction with the largest dot product against `target`.
/// Ties go to the earlier direction; a zero vector maps to Up.
pub fn vector_direction(target: Vec2) -> Direction {
    let target = target.normalize_or_zero();
    let mut best = Direction::Up;
    let mut max = f32::NEG_INFINITY;
    for dir in Direction::ALL {
        let dot = target.dot(dir.unit());
        if dot > max {
            max = dot;
            best = dir;
        }
    }
    best
}

/// Push the ball out along the hit axis and reverse that velocity component.
///
/// `pos` is the top-left of the ball's bounding square; only the axis of
/// the hit is touched.
pub fn resolve(pos: &mut Vec2, vel: &mut Vec2, radius: f32, info: &CollisionInfo) {
    if info.direction.is_horizontal() {
        vel.x = -vel.x;
        let depth = radius - info.penetration.x.abs();
        pos.x += info.direction.unit().x * depth;
    } else {
        vel.y = -vel.y;
        let depth = radius - info.penetration.y.abs();
        pos.y += info.direction.unit().y * depth;
    }
}
