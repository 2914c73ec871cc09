//! Collision detection between the player and obstacles
//!
//! Everything is a circle, so a hit is simply centre distance below the sum
//! of the radii. The comparison is strict: circles that only touch do not collide.

use glam::Vec2;

use super::state::{Obstacle, Player};

/// Strict circle-circle overlap test
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) < a_radius + b_radius
}

/// Index of the first obstacle (in spawn order) overlapping the player
pub fn first_hit(player: &Player, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles
        .iter()
        .position(|o| circles_overlap(player.pos, player.radius, o.pos, o.radius))
}

/// Whether the player overlaps any obstacle
///
/// Stops at the first hit; the answer does not depend on obstacle order.
pub fn detect(player: &Player, obstacles: &[Obstacle]) -> bool {
    first_hit(player, obstacles).is_some()
}
