//! Fixed timestep simulation tick
//!
//! Core game loop that advances the playfield one step. Order inside a tick
//! matters: collisions are resolved against positions from the end of the
//! previous tick, before anything moves or wraps.

use serde::{Deserialize, Serialize};

use super::collision::{projectile_hit, ship_hit};
use super::state::{Asteroid, GameEvent, Ship};
use crate::rng::RandomSource;
use crate::tuning::Tuning;
use crate::{heading_vector, wrap_hard, wrap_with_margin};

/// Rotation intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    /// Counter-clockwise on screen
    Left,
    Right,
    #[default]
    None,
}

impl Rotation {
    pub fn sign(self) -> f32 {
        match self {
            Rotation::Left => 1.0,
            Rotation::Right => -1.0,
            Rotation::None => 0.0,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub rotate: Rotation,
    /// Thrust held
    pub thrust: bool,
    /// Fire released before this tick's press (a quick tap re-arms first)
    pub release_before_fire: bool,
    /// Fire pressed since the last tick
    pub fire: bool,
    /// Fire released since the last tick (re-arms the latch)
    pub release_fire: bool,
}

/// Everything that moves on the playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
}

impl World {
    pub fn new(ship: Ship) -> Self {
        Self {
            ship,
            asteroids: Vec::new(),
        }
    }
}

/// Advance the playfield by one tick.
///
/// `level` scales the speed of fragments spawned this tick. Scoring, lives
/// and level changes are reported through the returned events and left to
/// the caller.
pub fn tick(
    world: &mut World,
    level: u32,
    input: &TickInput,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let World { ship, asteroids } = world;

    apply_input(ship, input, tuning, &mut events);

    // Sampled once: a ship hit this tick still finishes this tick's move
    let exploding = ship.is_exploding();

    // Thrust, or coast down under friction
    if ship.thrusting && !ship.dead {
        ship.vel += heading_vector(ship.angle) * tuning.thrust_per_tick();
    } else {
        ship.vel -= ship.vel * tuning.friction_per_tick();
    }

    if !exploding {
        update_blink(ship, tuning);
    }

    // Projectiles vs asteroids. Walk backwards so removals and appended
    // fragments never disturb indices still to be visited.
    let mut i = asteroids.len();
    while i > 0 {
        i -= 1;
        if let Some(j) = projectile_hit(&asteroids[i], &ship.projectiles) {
            ship.projectiles[j].explode_ticks = tuning.projectile_explode_ticks();
            destroy_asteroid(asteroids, i, level, tuning, rng, &mut events);
        }
    }

    if !exploding {
        // At most one ship collision per tick
        if ship.is_vulnerable() {
            if let Some(i) = ship_hit(ship, asteroids) {
                log::debug!("Ship hit at ({:.1}, {:.1})", ship.pos.x, ship.pos.y);
                ship.explode(tuning.ship_explode_ticks());
                events.push(GameEvent::ShipHit { pos: ship.pos });
                destroy_asteroid(asteroids, i, level, tuning, rng, &mut events);
            }
        }

        ship.turn();
        ship.pos += ship.vel;
    } else {
        ship.explode_ticks -= 1;
        if ship.explode_ticks == 0 {
            events.push(GameEvent::ShipDestroyed);
        }
    }

    let bounds = tuning.bounds();
    ship.pos = wrap_with_margin(ship.pos, ship.radius, bounds);

    let max_distance = tuning.projectile_max_distance();
    ship.projectiles.retain_mut(|p| {
        if p.explode_ticks > 0 {
            p.explode_ticks -= 1;
            return p.explode_ticks > 0;
        }
        p.pos += p.vel;
        p.traveled += p.vel.length();
        p.pos = wrap_hard(p.pos, bounds);
        p.traveled <= max_distance
    });

    for asteroid in asteroids.iter_mut() {
        asteroid.pos += asteroid.vel;
        asteroid.pos = wrap_with_margin(asteroid.pos, asteroid.radius, bounds);
    }

    events
}

/// Steering, thrust and fire. A dead ship ignores input.
fn apply_input(ship: &mut Ship, input: &TickInput, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    if ship.dead {
        return;
    }
    ship.rotation = input.rotate.sign() * tuning.turn_per_tick();
    ship.thrusting = input.thrust;
    if input.release_before_fire {
        ship.can_shoot = true;
    }
    if input.fire && ship.shoot(tuning) {
        events.push(GameEvent::ProjectileFired);
    }
    if input.release_fire {
        ship.can_shoot = true;
    }
}

/// Count down the invincibility blink
fn update_blink(ship: &mut Ship, tuning: &Tuning) {
    if ship.blink_cycles == 0 {
        return;
    }
    ship.blink_ticks = ship.blink_ticks.saturating_sub(1);
    if ship.blink_ticks == 0 {
        ship.blink_ticks = tuning.blink_ticks();
        ship.blink_cycles -= 1;
    }
}

/// Remove the asteroid at `index`, spawning its fragments at the end of the
/// collection. Reports the score and, if the belt is now empty, a cleared
/// level.
pub fn destroy_asteroid(
    asteroids: &mut Vec<Asteroid>,
    index: usize,
    level: u32,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
    events: &mut Vec<GameEvent>,
) {
    let rock = asteroids.remove(index);
    if let Some((tier, count)) = rock.tier.split() {
        for _ in 0..count {
            asteroids.push(Asteroid::spawn(rock.pos, tier, level, tuning, rng));
        }
    }
    events.push(GameEvent::AsteroidDestroyed {
        tier: rock.tier,
        points: rock.tier.points(tuning),
        pos: rock.pos,
    });
    if asteroids.is_empty() {
        events.push(GameEvent::LevelCleared);
    }
}

/// Park an asteroid so tests control exactly where it is
#[cfg(test)]
pub(crate) fn still_rock(pos: glam::Vec2, tier: super::AsteroidTier) -> Asteroid {
    let tuning = Tuning::default();
    let mut rng = crate::rng::ScriptedSource::constant(0.5);
    let mut rock = Asteroid::spawn(pos, tier, 0, &tuning, &mut rng);
    rock.vel = glam::Vec2::ZERO;
    rock
}
