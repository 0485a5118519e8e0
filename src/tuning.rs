//! Data-driven game balance
//!
//! Every tunable lives in [`Tuning`], expressed in designer-friendly units
//! (pixels, seconds, pixels per second). The simulation only ever reads the
//! derived per-tick values.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Absorbs float noise when converting seconds to whole ticks
const TICK_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Simulation rate (ticks per second)
    pub fps: f32,
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// Velocity fraction shed per second while coasting
    pub friction: f32,
    pub lives: u32,

    // === Asteroids ===
    pub asteroid_jag: f32,
    /// Belt size for the first level; each later level adds one
    pub asteroid_count: u32,
    /// Large asteroid diameter
    pub asteroid_size: f32,
    pub asteroid_speed: f32,
    pub asteroid_vertices: u32,
    pub points_large: u64,
    pub points_medium: u64,
    pub points_small: u64,

    // === Ship ===
    pub ship_size: f32,
    pub ship_thrust: f32,
    /// Degrees per second
    pub turn_speed: f32,
    pub ship_explode_secs: f32,
    pub ship_invincible_secs: f32,
    pub ship_blink_secs: f32,

    // === Projectiles ===
    pub projectile_max: usize,
    pub projectile_speed: f32,
    /// Fraction of playfield width a projectile may travel
    pub projectile_range: f32,
    pub projectile_explode_secs: f32,

    // === HUD ===
    pub banner_fade_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fps: FPS,
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            friction: FRICTION,
            lives: GAME_LIVES,

            asteroid_jag: ASTEROID_JAG,
            asteroid_count: ASTEROID_COUNT,
            asteroid_size: ASTEROID_SIZE,
            asteroid_speed: ASTEROID_SPEED,
            asteroid_vertices: ASTEROID_VERTICES,
            points_large: POINTS_LARGE,
            points_medium: POINTS_MEDIUM,
            points_small: POINTS_SMALL,

            ship_size: SHIP_SIZE,
            ship_thrust: SHIP_THRUST,
            turn_speed: TURN_SPEED,
            ship_explode_secs: SHIP_EXPLODE_SECS,
            ship_invincible_secs: SHIP_INVINCIBLE_SECS,
            ship_blink_secs: SHIP_BLINK_SECS,

            projectile_max: PROJECTILE_MAX,
            projectile_speed: PROJECTILE_SPEED,
            projectile_range: PROJECTILE_RANGE,
            projectile_explode_secs: PROJECTILE_EXPLODE_SECS,

            banner_fade_secs: BANNER_FADE_SECS,
        }
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    // Written this way so NaN is rejected too
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn within(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn nonzero(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::ZeroCount { field })
    } else {
        Ok(())
    }
}

impl Tuning {
    /// Parse and validate a tuning file. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("fps", self.fps)?;
        positive("playfield_width", self.playfield_width)?;
        positive("playfield_height", self.playfield_height)?;
        // Per-tick decay must stay in [0, 1] so velocity never overshoots zero
        within("friction", self.friction, 0.0, self.fps)?;
        nonzero("lives", self.lives as u64)?;

        within("asteroid_jag", self.asteroid_jag, 0.0, 0.999)?;
        positive("asteroid_size", self.asteroid_size)?;
        within("asteroid_speed", self.asteroid_speed, 0.0, f32::MAX)?;
        nonzero("asteroid_count", self.asteroid_count as u64)?;
        nonzero("asteroid_vertices", self.asteroid_vertices as u64)?;

        positive("ship_size", self.ship_size)?;
        within("ship_thrust", self.ship_thrust, 0.0, f32::MAX)?;
        within("turn_speed", self.turn_speed, 0.0, f32::MAX)?;
        positive("ship_explode_secs", self.ship_explode_secs)?;
        within("ship_invincible_secs", self.ship_invincible_secs, 0.0, f32::MAX)?;
        positive("ship_blink_secs", self.ship_blink_secs)?;

        nonzero("projectile_max", self.projectile_max as u64)?;
        positive("projectile_speed", self.projectile_speed)?;
        positive("projectile_range", self.projectile_range)?;
        positive("projectile_explode_secs", self.projectile_explode_secs)?;

        positive("banner_fade_secs", self.banner_fade_secs)?;
        Ok(())
    }

    /// Whole ticks covering a duration, never less than one
    pub fn ticks(&self, secs: f32) -> u32 {
        ((secs * self.fps - TICK_EPSILON).ceil() as u32).max(1)
    }

    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.playfield_width, self.playfield_height)
    }

    pub fn center(&self) -> Vec2 {
        self.bounds() / 2.0
    }

    pub fn ship_radius(&self) -> f32 {
        self.ship_size / 2.0
    }

    pub fn thrust_per_tick(&self) -> f32 {
        self.ship_thrust / self.fps
    }

    pub fn friction_per_tick(&self) -> f32 {
        self.friction / self.fps
    }

    /// Angular velocity while a rotate key is held (radians per tick)
    pub fn turn_per_tick(&self) -> f32 {
        self.turn_speed.to_radians() / self.fps
    }

    pub fn ship_explode_ticks(&self) -> u32 {
        self.ticks(self.ship_explode_secs)
    }

    /// Length of one blink half-cycle
    pub fn blink_ticks(&self) -> u32 {
        self.ticks(self.ship_blink_secs)
    }

    /// Number of blink half-cycles the ship stays invincible for
    pub fn blink_cycles(&self) -> u32 {
        if self.ship_invincible_secs <= 0.0 {
            return 0;
        }
        (self.ship_invincible_secs / self.ship_blink_secs - TICK_EPSILON).ceil() as u32
    }

    pub fn projectile_speed_per_tick(&self) -> f32 {
        self.projectile_speed / self.fps
    }

    /// Distance after which a projectile fizzles out
    pub fn projectile_max_distance(&self) -> f32 {
        self.projectile_range * self.playfield_width
    }

    pub fn projectile_explode_ticks(&self) -> u32 {
        self.ticks(self.projectile_explode_secs)
    }

    pub fn asteroid_speed_per_tick(&self) -> f32 {
        self.asteroid_speed / self.fps
    }

    /// Keep-out distance around the ship when seeding a belt
    pub fn belt_exclusion(&self) -> f32 {
        self.asteroid_size * 2.0 + self.ship_radius()
    }

    pub fn banner_fade_per_tick(&self) -> f32 {
        1.0 / self.banner_fade_secs / self.fps
    }
}
