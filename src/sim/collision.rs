//! Circle-based collision detection
//!
//! Every body is treated as a circle: asteroids by their nominal radius
//! (ignoring the jagged outline), the ship by its radius and projectiles as
//! points.

use glam::Vec2;

use super::state::{Asteroid, Projectile, Ship};
use crate::distance;

/// Point strictly inside a circle
#[inline]
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    distance(point, center) < radius
}

/// Two circles strictly overlap
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    distance(a, b) < ra + rb
}

/// Latest in-flight projectile inside the asteroid, if any
pub fn projectile_hit(asteroid: &Asteroid, projectiles: &[Projectile]) -> Option<usize> {
    projectiles
        .iter()
        .rposition(|p| p.is_active() && point_in_circle(p.pos, asteroid.pos, asteroid.radius))
}

/// First asteroid touching the ship, if any
pub fn ship_hit(ship: &Ship, asteroids: &[Asteroid]) -> Option<usize> {
    asteroids
        .iter()
        .position(|a| circles_overlap(ship.pos, ship.radius, a.pos, a.radius))
}
