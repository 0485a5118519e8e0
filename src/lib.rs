//! Asteroid Belt - single-screen asteroids arcade simulation
//!
//! Core modules:
//! - `sim`: Per-tick simulation (motion, wraparound, collisions, fragmentation)
//! - `session`: Level/lives/score bookkeeping around the simulation
//! - `input`: Device-independent input intent table
//! - `persistence`: Key/value stores for the high score slot
//! - `platform`: Fixed-step tick clock
//! - `tuning`: Data-driven game balance
//!
//! Rendering is left to the host: `Session::scene` hands out a read-only
//! snapshot of everything needed to draw a frame.

pub mod error;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod rng;
pub mod session;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::ConfigError;
pub use highscores::HighScore;
pub use input::{Action, InputState};
pub use rng::{PcgSource, RandomSource, ScriptedSource};
pub use session::{Banner, GamePhase, Scene, Session};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const FPS: f32 = 30.0;
    /// Maximum ticks run per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions in pixels
    pub const PLAYFIELD_WIDTH: f32 = 700.0;
    pub const PLAYFIELD_HEIGHT: f32 = 500.0;

    /// Fraction of velocity shed per second when not thrusting (0 = none, 1 = max)
    pub const FRICTION: f32 = 0.7;
    /// Starting number of lives
    pub const GAME_LIVES: u32 = 3;

    /// Jaggedness of the asteroids (0 = none, 1 = lots)
    pub const ASTEROID_JAG: f32 = 0.38;
    /// Asteroids in the first level's belt
    pub const ASTEROID_COUNT: u32 = 3;
    /// Diameter of a large asteroid in pixels
    pub const ASTEROID_SIZE: f32 = 100.0;
    /// Max starting speed of asteroids in pixels per second
    pub const ASTEROID_SPEED: f32 = 50.0;
    /// Average number of vertices on each asteroid
    pub const ASTEROID_VERTICES: u32 = 10;
    pub const POINTS_LARGE: u64 = 20;
    pub const POINTS_MEDIUM: u64 = 50;
    pub const POINTS_SMALL: u64 = 100;

    /// Ship height in pixels
    pub const SHIP_SIZE: f32 = 30.0;
    /// Ship acceleration in pixels per second per second
    pub const SHIP_THRUST: f32 = 5.0;
    /// Turn speed in degrees per second
    pub const TURN_SPEED: f32 = 360.0;
    pub const SHIP_EXPLODE_SECS: f32 = 0.3;
    pub const SHIP_INVINCIBLE_SECS: f32 = 3.0;
    pub const SHIP_BLINK_SECS: f32 = 0.1;

    /// Maximum number of projectiles in flight at once
    pub const PROJECTILE_MAX: usize = 10;
    /// Projectile speed in pixels per second
    pub const PROJECTILE_SPEED: f32 = 500.0;
    /// Maximum travel as a fraction of playfield width
    pub const PROJECTILE_RANGE: f32 = 0.6;
    pub const PROJECTILE_EXPLODE_SECS: f32 = 0.1;

    /// Banner fade-out time in seconds
    pub const BANNER_FADE_SECS: f32 = 2.5;
}

/// Distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector for a heading angle in screen space (y grows downward)
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), -angle.sin())
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Wrap a body of the given radius once it has fully left the playfield.
///
/// The radius offset is preserved, so a body leaving at `-r` reappears at
/// `width + r` and keeps moving continuously.
pub fn wrap_with_margin(pos: Vec2, margin: f32, bounds: Vec2) -> Vec2 {
    let mut out = pos;
    if pos.x < -margin {
        out.x = bounds.x + margin;
    } else if pos.x > bounds.x + margin {
        out.x = -margin;
    }
    if pos.y < -margin {
        out.y = bounds.y + margin;
    } else if pos.y > bounds.y + margin {
        out.y = -margin;
    }
    out
}

/// Hard wrap for point-sized bodies (projectiles)
pub fn wrap_hard(pos: Vec2, bounds: Vec2) -> Vec2 {
    wrap_with_margin(pos, 0.0, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const BOUNDS: Vec2 = Vec2::new(700.0, 500.0);

    #[test]
    fn heading_points_up_at_ninety_degrees() {
        let v = heading_vector(FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_angle_range() {
        assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-5);
        assert!((normalize_angle(-2.5 * PI) + 0.5 * PI).abs() < 1e-5);
        assert_eq!(normalize_angle(0.5), 0.5);
        for angle in [3.0 * PI, -3.0 * PI, 7.0, -7.0, PI] {
            let n = normalize_angle(angle);
            assert!((-PI..PI).contains(&n), "{angle} -> {n}");
            assert!((n.sin() - angle.sin()).abs() < 1e-4);
            assert!((n.cos() - angle.cos()).abs() < 1e-4);
        }
    }

    #[test]
    fn wrap_each_edge_keeps_margin() {
        let r = 15.0;
        assert_eq!(wrap_with_margin(Vec2::new(-r - 0.1, 100.0), r, BOUNDS).x, 700.0 + r);
        assert_eq!(wrap_with_margin(Vec2::new(700.0 + r + 0.1, 100.0), r, BOUNDS).x, -r);
        assert_eq!(wrap_with_margin(Vec2::new(100.0, -r - 0.1), r, BOUNDS).y, 500.0 + r);
        assert_eq!(wrap_with_margin(Vec2::new(100.0, 500.0 + r + 0.1), r, BOUNDS).y, -r);
    }

    #[test]
    fn wrap_leaves_inside_points_alone() {
        let p = Vec2::new(-15.0, 515.0);
        assert_eq!(wrap_with_margin(p, 15.0, BOUNDS), p);
    }

    #[test]
    fn hard_wrap_snaps_to_edges() {
        assert_eq!(wrap_hard(Vec2::new(-0.5, 10.0), BOUNDS), Vec2::new(700.0, 10.0));
        assert_eq!(wrap_hard(Vec2::new(10.0, 500.5), BOUNDS), Vec2::new(10.0, 0.0));
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(distance(Vec2::ZERO, Vec2::new(3.0, 4.0)), 5.0);
    }
}
