//! End-to-end session scenarios through the public API

use asteroid_belt::persistence::{KeyValueStore, MemoryStore};
use asteroid_belt::sim::{Asteroid, AsteroidTier, GameEvent, Projectile, Rotation};
use asteroid_belt::{Action, GamePhase, PcgSource, ScriptedSource, Session, Tuning, distance};
use glam::Vec2;

fn session(seed: u64) -> Session<MemoryStore, PcgSource> {
    Session::new(Tuning::default(), MemoryStore::new(), PcgSource::seeded(seed)).unwrap()
}

/// Motionless rock with a deterministic shape
fn parked(pos: Vec2, tier: AsteroidTier, tuning: &Tuning) -> Asteroid {
    let mut rock = Asteroid::spawn(pos, tier, 0, tuning, &mut ScriptedSource::constant(0.5));
    rock.vel = Vec2::ZERO;
    rock
}

/// Leave a single rock on the field with a projectile sitting on it
fn stage_hit(s: &mut Session<MemoryStore, PcgSource>, tier: AsteroidTier) {
    let pos = Vec2::new(80.0, 420.0);
    let rock = parked(pos, tier, s.tuning());
    let world = s.world_mut();
    world.asteroids = vec![rock];
    world.ship.projectiles.push(Projectile::new(pos, Vec2::ZERO));
}

#[test]
fn first_level_belt_keeps_clear_of_ship() {
    for seed in 0..20 {
        let s = session(seed);
        assert_eq!(s.asteroids().len(), 3);
        let keep_out = s.tuning().belt_exclusion();
        for rock in s.asteroids() {
            assert_eq!(rock.tier, AsteroidTier::Large);
            assert_eq!(rock.radius, 50.0);
            assert!(distance(rock.pos, s.ship().pos) >= keep_out);
        }
    }
}

#[test]
fn losing_the_last_life_is_game_over() {
    let tuning = Tuning {
        lives: 1,
        ..Default::default()
    };
    let mut s = Session::new(tuning, MemoryStore::new(), PcgSource::seeded(5)).unwrap();
    s.world_mut().ship.explode(2);

    assert!(s.tick().is_empty());
    assert_eq!(s.phase(), GamePhase::ShipExploding);
    let events = s.tick();
    assert!(events.contains(&GameEvent::ShipDestroyed));
    assert!(events.contains(&GameEvent::LifeLost { remaining: 0 }));
    assert!(events.contains(&GameEvent::GameOver { score: 0 }));
    assert_eq!(s.phase(), GamePhase::GameOver);
    assert_eq!(s.banner().map(|b| b.text.as_str()), Some("Game Over"));
}

#[test]
fn clearing_the_belt_starts_next_level() {
    let mut s = session(9);
    stage_hit(&mut s, AsteroidTier::Small);
    let events = s.tick();
    assert!(events.contains(&GameEvent::LevelCleared));
    assert_eq!(s.level(), 1);
    assert_eq!(s.asteroids().len(), 4);
    assert!(s.asteroids().iter().all(|a| a.tier == AsteroidTier::Large));
}

#[test]
fn high_score_survives_restart() {
    let mut s = session(1);
    stage_hit(&mut s, AsteroidTier::Small);
    s.tick();
    assert_eq!(s.score(), 100);
    assert_eq!(s.high_score(), 100);

    let store = s.into_store();
    assert_eq!(store.get("highscore").as_deref(), Some("100"));

    let s = Session::new(Tuning::default(), store, PcgSource::seeded(2)).unwrap();
    assert_eq!(s.score(), 0);
    assert_eq!(s.high_score(), 100);
}

#[test]
fn corrupt_high_score_starts_at_zero() {
    let mut store = MemoryStore::new();
    store.set("highscore", "not a number");
    let s = Session::new(Tuning::default(), store, PcgSource::seeded(3)).unwrap();
    assert_eq!(s.high_score(), 0);
}

#[test]
fn projectile_expires_after_its_range() {
    let mut s = session(4);
    s.world_mut().asteroids.clear();
    s.press(Action::Fire);

    let step = s.tuning().projectile_speed_per_tick();
    let last_tick = (s.tuning().projectile_max_distance() / step).floor() as usize;
    for _ in 0..last_tick {
        s.tick();
    }
    assert_eq!(s.ship().projectiles.len(), 1);
    s.tick();
    assert!(s.ship().projectiles.is_empty());
}

#[test]
fn one_shot_per_fire_press() {
    let mut s = session(6);
    s.world_mut().asteroids.clear();
    s.press(Action::Fire);
    for _ in 0..5 {
        s.tick();
    }
    assert_eq!(s.ship().projectiles.len(), 1);

    s.release(Action::Fire);
    s.press(Action::Fire);
    s.tick();
    assert_eq!(s.ship().projectiles.len(), 2);
}

#[test]
fn ship_turns_while_rotate_held() {
    let mut s = session(7);
    let start = s.ship().angle;
    s.set_rotate(Rotation::Right);
    s.tick();
    s.tick();
    let turned = start - s.ship().angle;
    assert!((turned - 2.0 * s.tuning().turn_per_tick()).abs() < 1e-4);
}

#[test]
fn same_seed_and_inputs_replay_identically() {
    let script = |s: &mut Session<MemoryStore, PcgSource>| {
        let mut frames = Vec::new();
        for tick in 0..240u32 {
            match tick % 40 {
                0 => s.press(Action::RotateLeft),
                10 => s.release(Action::RotateLeft),
                15 => s.press(Action::Thrust),
                25 => s.release(Action::Thrust),
                _ => {}
            }
            if tick % 4 == 0 {
                s.press(Action::Fire);
            } else if tick % 4 == 2 {
                s.release(Action::Fire);
            }
            s.tick();
            frames.push(serde_json::to_string(&s.scene()).unwrap());
        }
        frames
    };

    let a = script(&mut session(42));
    let b = script(&mut session(42));
    assert_eq!(a, b);
}
