//! Hit-box collision between the runner and obstacles
//!
//! Screen space: x grows right, y grows down. Touching edges do not count as
//! overlap.

use glam::Vec2;

use super::state::{Obstacle, Player};
use crate::tuning::Tuning;

/// Axis-aligned box, `min` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            max: Vec2::new(right, bottom),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }
    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }
    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.bottom() > other.top()
            && self.top() < other.bottom()
    }
}

/// The runner's hit-box: narrower than the sprite, anchored to the feet
pub fn player_hitbox(player: &Player, tuning: &Tuning) -> Aabb {
    let top = player.y - tuning.player_height + tuning.player_hitbox_inset_top;
    Aabb::new(
        tuning.player_hitbox_left(),
        top,
        tuning.player_hitbox_right(),
        player.y,
    )
}

/// An obstacle's hit-box: fixed size, lifted by its kind
pub fn obstacle_hitbox(obstacle: &Obstacle, tuning: &Tuning) -> Aabb {
    let bottom = tuning.ground_y - obstacle.kind.lift(tuning);
    Aabb::new(
        obstacle.x,
        bottom - tuning.obstacle_height,
        obstacle.right(tuning),
        bottom,
    )
}

/// First obstacle (oldest first) whose hit-box overlaps the player's.
/// Stops at the first hit.
pub fn first_collision<'a>(
    player: &Player,
    obstacles: &'a [Obstacle],
    tuning: &Tuning,
) -> Option<&'a Obstacle> {
    let hitbox = player_hitbox(player, tuning);
    obstacles
        .iter()
        .find(|o| hitbox.overlaps(&obstacle_hitbox(o, tuning)))
}
