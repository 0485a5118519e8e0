//! Entity types and their spawn rules
//!
//! Positions are in playfield pixels with y growing downward; velocities are
//! pixels per tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::rng::RandomSource;
use crate::tuning::Tuning;
use crate::{heading_vector, normalize_angle};

/// Asteroid size class. Decides radius, score and how it breaks apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidTier {
    Large,
    Medium,
    Small,
}

impl AsteroidTier {
    pub fn radius(self, tuning: &Tuning) -> f32 {
        let divisor = match self {
            AsteroidTier::Large => 2.0,
            AsteroidTier::Medium => 4.0,
            AsteroidTier::Small => 8.0,
        };
        (tuning.asteroid_size / divisor).ceil()
    }

    pub fn points(self, tuning: &Tuning) -> u64 {
        match self {
            AsteroidTier::Large => tuning.points_large,
            AsteroidTier::Medium => tuning.points_medium,
            AsteroidTier::Small => tuning.points_small,
        }
    }

    /// Fragment tier and count produced when destroyed
    pub fn split(self) -> Option<(AsteroidTier, usize)> {
        match self {
            AsteroidTier::Large => Some((AsteroidTier::Medium, 2)),
            AsteroidTier::Medium => Some((AsteroidTier::Small, 4)),
            AsteroidTier::Small => None,
        }
    }
}

/// A drifting rock with a fixed jagged silhouette
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub tier: AsteroidTier,
    /// Silhouette rotation (radians)
    pub angle: f32,
    /// Per-vertex radius multipliers, fixed at spawn
    jitter: Vec<f32>,
}

impl Asteroid {
    /// Spawn an asteroid with a random velocity and shape.
    ///
    /// Draw order: x speed, x sign, y speed, y sign, angle, vertex count,
    /// then one jitter factor per vertex.
    pub fn spawn(
        pos: Vec2,
        tier: AsteroidTier,
        level: u32,
        tuning: &Tuning,
        rng: &mut impl RandomSource,
    ) -> Self {
        let max_speed = tuning.asteroid_speed_per_tick() * (1.0 + 0.1 * level as f32);
        let vx = rng.next_scaled(max_speed) * rng.next_sign();
        let vy = rng.next_scaled(max_speed) * rng.next_sign();
        let angle = rng.next_scaled(std::f32::consts::TAU);

        let base = tuning.asteroid_vertices as f32;
        let vertices = ((rng.next_unit() * (base + 1.0) + base / 2.0).floor() as usize).max(3);

        let jag = tuning.asteroid_jag;
        let jitter = (0..vertices)
            .map(|_| rng.next_unit() * jag * 2.0 + 1.0 - jag)
            .collect();

        Self {
            pos,
            vel: Vec2::new(vx, vy),
            radius: tier.radius(tuning),
            tier,
            angle,
            jitter,
        }
    }

    pub fn jitter(&self) -> &[f32] {
        &self.jitter
    }

    pub fn vertex_count(&self) -> usize {
        self.jitter.len()
    }

    /// Polygon vertices in playfield coordinates
    pub fn outline(&self) -> Vec<Vec2> {
        let step = std::f32::consts::TAU / self.jitter.len() as f32;
        self.jitter
            .iter()
            .enumerate()
            .map(|(i, offset)| {
                let theta = self.angle + i as f32 * step;
                self.pos + Vec2::new(theta.cos(), theta.sin()) * self.radius * offset
            })
            .collect()
    }
}

/// A laser bolt fired from the ship's nose
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Cumulative distance flown
    pub traveled: f32,
    /// Ticks of impact flash left (0 = in flight)
    pub explode_ticks: u32,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            traveled: 0.0,
            explode_ticks: 0,
        }
    }

    /// In flight and able to hit something
    pub fn is_active(&self) -> bool {
        self.explode_ticks == 0
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Heading (radians, 0 = right, π/2 = up)
    pub angle: f32,
    /// Angular velocity (radians per tick)
    pub rotation: f32,
    pub vel: Vec2,
    pub radius: f32,
    pub thrusting: bool,
    /// Ticks of explosion left (0 = intact)
    pub explode_ticks: u32,
    /// Ticks left in the current blink half-cycle
    pub blink_ticks: u32,
    /// Blink half-cycles left; the ship is invincible while non-zero
    pub blink_cycles: u32,
    /// Fire latch, re-armed when the fire control is released
    pub can_shoot: bool,
    pub projectiles: Vec<Projectile>,
    /// Out of lives; ignores input until the next game
    pub dead: bool,
}

impl Ship {
    /// Fresh, invincible ship at the center of the playfield facing up
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.center(),
            angle: std::f32::consts::FRAC_PI_2,
            rotation: 0.0,
            vel: Vec2::ZERO,
            radius: tuning.ship_radius(),
            thrusting: false,
            explode_ticks: 0,
            blink_ticks: tuning.blink_ticks(),
            blink_cycles: tuning.blink_cycles(),
            can_shoot: true,
            projectiles: Vec::new(),
            dead: false,
        }
    }

    pub fn is_exploding(&self) -> bool {
        self.explode_ticks > 0
    }

    pub fn is_invincible(&self) -> bool {
        self.blink_cycles > 0
    }

    /// Can be destroyed by an asteroid right now
    pub fn is_vulnerable(&self) -> bool {
        !self.is_invincible() && !self.is_exploding() && !self.dead
    }

    /// Blink parity: the ship is drawn on even cycles
    pub fn blink_on(&self) -> bool {
        self.blink_cycles % 2 == 0
    }

    /// Whether a renderer should draw the hull this frame
    pub fn is_visible(&self) -> bool {
        self.blink_on() && !self.is_exploding() && !self.dead
    }

    pub fn explode(&mut self, ticks: u32) {
        self.explode_ticks = ticks;
    }

    pub fn turn(&mut self) {
        self.angle = normalize_angle(self.angle + self.rotation);
    }

    /// Tip of the hull, where projectiles leave from
    pub fn nose(&self) -> Vec2 {
        self.pos + heading_vector(self.angle) * (4.0 / 3.0) * self.radius
    }

    /// Hull triangle: nose, rear left, rear right
    pub fn outline(&self) -> [Vec2; 3] {
        let (sin, cos) = self.angle.sin_cos();
        let r = self.radius;
        [
            self.nose(),
            self.pos + Vec2::new(-r * (2.0 / 3.0 * cos + sin), r * (2.0 / 3.0 * sin - cos)),
            self.pos + Vec2::new(-r * (2.0 / 3.0 * cos - sin), r * (2.0 / 3.0 * sin + cos)),
        ]
    }

    /// Projectiles still flying (not flashing from an impact)
    pub fn active_projectiles(&self) -> usize {
        self.projectiles.iter().filter(|p| p.is_active()).count()
    }

    /// Fire from the nose if the latch is armed and the cap allows.
    ///
    /// The latch drops either way and stays down until the fire control is
    /// released. Returns whether a projectile was spawned.
    pub fn shoot(&mut self, tuning: &Tuning) -> bool {
        let fired = self.can_shoot && self.projectiles.len() < tuning.projectile_max;
        if fired {
            let vel = heading_vector(self.angle) * tuning.projectile_speed_per_tick();
            self.projectiles.push(Projectile::new(self.nose(), vel));
        }
        self.can_shoot = false;
        fired
    }
}

/// Something that happened during a tick, in the order it happened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ProjectileFired,
    AsteroidDestroyed {
        tier: AsteroidTier,
        points: u64,
        pos: Vec2,
    },
    /// Ship struck an asteroid and started exploding
    ShipHit { pos: Vec2 },
    /// Explosion finished; a life is spent
    ShipDestroyed,
    /// Last asteroid of the level is gone
    LevelCleared,
    // Session-level bookkeeping
    LevelStarted { level: u32 },
    NewHighScore { score: u64 },
    LifeLost { remaining: u32 },
    GameOver { score: u64 },
    NewGame,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;

    #[test]
    fn tier_radii_and_points() {
        let t = Tuning::default();
        assert_eq!(AsteroidTier::Large.radius(&t), 50.0);
        assert_eq!(AsteroidTier::Medium.radius(&t), 25.0);
        assert_eq!(AsteroidTier::Small.radius(&t), 13.0);
        assert_eq!(AsteroidTier::Large.points(&t), 20);
        assert_eq!(AsteroidTier::Medium.points(&t), 50);
        assert_eq!(AsteroidTier::Small.points(&t), 100);
    }

    #[test]
    fn tiers_split_down() {
        assert_eq!(AsteroidTier::Large.split(), Some((AsteroidTier::Medium, 2)));
        assert_eq!(AsteroidTier::Medium.split(), Some((AsteroidTier::Small, 4)));
        assert_eq!(AsteroidTier::Small.split(), None);
    }

    #[test]
    fn asteroid_spawn_follows_draw_order() {
        let t = Tuning::default();
        // x speed, x sign (+), y speed, y sign (-), angle, vertex count, jitter...
        let mut rng =
            ScriptedSource::new([0.5, 0.1, 1.0, 0.9, 0.25, 0.0, 0.5, 0.5, 0.5, 0.5, 0.5]);
        let a = Asteroid::spawn(Vec2::new(10.0, 20.0), AsteroidTier::Large, 0, &t, &mut rng);

        let max = t.asteroid_speed_per_tick();
        assert!((a.vel.x - 0.5 * max).abs() < 1e-5);
        assert!(a.vel.y < 0.0);
        assert!((a.angle - 0.25 * std::f32::consts::TAU).abs() < 1e-5);
        assert_eq!(a.vertex_count(), 5);
        assert_eq!(rng.draws(), 6 + 5);
        assert!(a.jitter().iter().all(|&j| (j - 1.0).abs() < 1e-5));
    }

    #[test]
    fn asteroid_speed_scales_with_level() {
        let t = Tuning::default();
        let mut rng = ScriptedSource::constant(0.99);
        let a = Asteroid::spawn(Vec2::ZERO, AsteroidTier::Small, 10, &t, &mut rng);
        let max = t.asteroid_speed_per_tick() * 2.0;
        assert!(a.vel.x.abs() <= max && a.vel.x.abs() > t.asteroid_speed_per_tick());
    }

    #[test]
    fn jitter_within_jag_band() {
        let t = Tuning::default();
        let mut rng = crate::rng::PcgSource::seeded(3);
        for _ in 0..50 {
            let a = Asteroid::spawn(Vec2::ZERO, AsteroidTier::Medium, 0, &t, &mut rng);
            assert!((5..=15).contains(&a.vertex_count()));
            for &j in a.jitter() {
                assert!(j >= 1.0 - t.asteroid_jag - 1e-5 && j <= 1.0 + t.asteroid_jag + 1e-5);
            }
            assert_eq!(a.outline().len(), a.vertex_count());
        }
    }

    #[test]
    fn spawned_ship_is_centered_and_invincible() {
        let t = Tuning::default();
        let ship = Ship::spawn(&t);
        assert_eq!(ship.pos, Vec2::new(350.0, 250.0));
        assert!((ship.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!(ship.is_invincible());
        assert!(!ship.is_vulnerable());
        assert!(ship.can_shoot);
        assert!(ship.projectiles.is_empty());
    }

    #[test]
    fn nose_sits_above_center_when_facing_up() {
        let ship = Ship::spawn(&Tuning::default());
        let nose = ship.nose();
        assert!((nose.x - 350.0).abs() < 1e-4);
        assert!((nose.y - (250.0 - 20.0)).abs() < 1e-4);
    }

    #[test]
    fn shoot_respects_latch_and_cap() {
        let t = Tuning::default();
        let mut ship = Ship::spawn(&t);
        assert!(ship.shoot(&t));
        assert!(!ship.shoot(&t), "latch must block a second shot");

        for _ in 0..20 {
            ship.can_shoot = true;
            ship.shoot(&t);
        }
        assert_eq!(ship.projectiles.len(), t.projectile_max);
        // Fired straight up
        assert!(ship.projectiles[0].vel.y < 0.0);
    }
}
