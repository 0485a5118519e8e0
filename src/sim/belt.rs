//! Level start: seeding the asteroid belt

use glam::Vec2;

use super::state::{Asteroid, AsteroidTier, Ship};
use crate::distance;
use crate::rng::RandomSource;
use crate::tuning::Tuning;

/// Give up rejection sampling after this many tries and take the last point
pub const MAX_SPAWN_ATTEMPTS: u32 = 1000;

/// Number of large asteroids a level starts with
pub fn belt_size(level: u32, tuning: &Tuning) -> usize {
    (tuning.asteroid_count + level) as usize
}

/// Pick a spawn point at least the belt exclusion distance from the ship.
///
/// Points are whole pixels drawn uniformly over the playfield.
pub fn sample_spawn_point(ship: &Ship, tuning: &Tuning, rng: &mut impl RandomSource) -> Vec2 {
    let keep_out = tuning.belt_exclusion();
    let mut point = Vec2::ZERO;
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        point = Vec2::new(
            rng.next_scaled(tuning.playfield_width).floor(),
            rng.next_scaled(tuning.playfield_height).floor(),
        );
        if distance(ship.pos, point) >= keep_out {
            return point;
        }
    }
    log::warn!(
        "No spawn point clear of the ship after {} attempts, using ({}, {})",
        MAX_SPAWN_ATTEMPTS,
        point.x,
        point.y
    );
    point
}

/// Generate a fresh belt of large asteroids for `level`
pub fn generate_belt(
    level: u32,
    ship: &Ship,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
) -> Vec<Asteroid> {
    let count = belt_size(level, tuning);
    log::debug!("Level {} belt: {} asteroids", level + 1, count);
    (0..count)
        .map(|_| {
            let pos = sample_spawn_point(ship, tuning, rng);
            Asteroid::spawn(pos, AsteroidTier::Large, level, tuning, rng)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{PcgSource, ScriptedSource};

    #[test]
    fn first_level_has_three_large() {
        let tuning = Tuning::default();
        let ship = Ship::spawn(&tuning);
        let belt = generate_belt(0, &ship, &tuning, &mut PcgSource::seeded(1));
        assert_eq!(belt.len(), 3);
        assert!(belt.iter().all(|a| a.tier == AsteroidTier::Large));
    }

    #[test]
    fn belt_grows_with_level() {
        let tuning = Tuning::default();
        let ship = Ship::spawn(&tuning);
        for level in 0..6 {
            let belt = generate_belt(level, &ship, &tuning, &mut PcgSource::seeded(level as u64));
            assert_eq!(belt.len(), 3 + level as usize);
        }
    }

    #[test]
    fn spawns_clear_of_ship() {
        let tuning = Tuning::default();
        let ship = Ship::spawn(&tuning);
        let mut rng = PcgSource::seeded(99);
        for _ in 0..200 {
            let p = sample_spawn_point(&ship, &tuning, &mut rng);
            assert!(distance(p, ship.pos) >= tuning.belt_exclusion());
            assert!(p.x >= 0.0 && p.x < tuning.playfield_width);
            assert!(p.y >= 0.0 && p.y < tuning.playfield_height);
        }
    }

    #[test]
    fn rejects_points_near_ship() {
        let tuning = Tuning::default();
        let ship = Ship::spawn(&tuning);
        // First draw lands on the ship, second lands in the top-left corner
        let mut rng = ScriptedSource::new([0.5, 0.5, 0.0, 0.0]);
        assert_eq!(sample_spawn_point(&ship, &tuning, &mut rng), Vec2::ZERO);
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn tiny_playfield_does_not_hang() {
        let tuning = Tuning {
            playfield_width: 50.0,
            playfield_height: 50.0,
            ..Default::default()
        };
        let ship = Ship::spawn(&tuning);
        let belt = generate_belt(0, &ship, &tuning, &mut PcgSource::seeded(5));
        assert_eq!(belt.len(), 3);
    }

    #[test]
    fn exhausted_sampling_keeps_last_point() {
        let tuning = Tuning::default();
        let ship = Ship::spawn(&tuning);
        // Every draw lands near the ship; the final pair is offset by a pixel
        let mut draws = vec![0.5; (MAX_SPAWN_ATTEMPTS as usize - 1) * 2];
        draws.extend([0.5025, 0.5025]);
        let mut rng = ScriptedSource::new(draws);
        let point = sample_spawn_point(&ship, &tuning, &mut rng);
        assert_eq!(rng.draws(), MAX_SPAWN_ATTEMPTS as usize * 2);
        assert_eq!(point, Vec2::new(351.0, 251.0));
        assert!(distance(point, ship.pos) < tuning.belt_exclusion());
    }
}
