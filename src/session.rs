//! Game session: one player's run from first level to game over
//!
//! Owns the playfield and the counters around it. Each call to
//! [`Session::tick`] runs one simulation step, then applies the resulting
//! events to score, lives and level, and fades the banner.

use glam::Vec2;
use serde::Serialize;

use crate::error::ConfigError;
use crate::highscores::HighScore;
use crate::input::{Action, InputState};
use crate::persistence::KeyValueStore;
use crate::rng::{PcgSource, RandomSource};
use crate::sim::{self, Asteroid, GameEvent, Projectile, Rotation, Ship, World, generate_belt};
use crate::tuning::Tuning;

/// Coarse session state for hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    Playing,
    /// Ship is mid-explosion; a life is about to be spent
    ShipExploding,
    /// Out of lives; a new game starts once the banner fades
    GameOver,
}

/// Transient status text that fades out
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub text: String,
    /// 1.0 when shown, counts down every tick; hidden once negative
    pub alpha: f32,
}

impl Banner {
    fn show(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            alpha: 1.0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.alpha >= 0.0
    }
}

/// Read-only view of everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Scene<'a> {
    pub playfield: Vec2,
    pub phase: GamePhase,
    pub ship: &'a Ship,
    /// False while blinking off, exploding or dead
    pub ship_visible: bool,
    pub ship_outline: [Vec2; 3],
    pub asteroids: &'a [Asteroid],
    pub asteroid_outlines: Vec<Vec<Vec2>>,
    pub projectiles: &'a [Projectile],
    pub score: u64,
    pub high_score: u64,
    pub lives: u32,
    /// 0-based
    pub level: u32,
    pub banner: Option<&'a Banner>,
}

pub struct Session<S: KeyValueStore, R: RandomSource = PcgSource> {
    tuning: Tuning,
    world: World,
    level: u32,
    lives: u32,
    score: u64,
    high_score: u64,
    banner: Banner,
    input: InputState,
    store: S,
    rng: R,
    ticks: u64,
}

impl<S: KeyValueStore> Session<S, PcgSource> {
    /// Session with unseeded asteroid generation
    pub fn with_entropy(tuning: Tuning, store: S) -> Result<Self, ConfigError> {
        Self::new(tuning, store, PcgSource::from_entropy())
    }
}

impl<S: KeyValueStore, R: RandomSource> Session<S, R> {
    /// Validate the tuning and start the first game
    pub fn new(tuning: Tuning, store: S, rng: R) -> Result<Self, ConfigError> {
        tuning.validate()?;
        let ship = Ship::spawn(&tuning);
        let mut session = Self {
            tuning,
            world: World::new(ship),
            level: 0,
            lives: 0,
            score: 0,
            high_score: 0,
            banner: Banner::show(""),
            input: InputState::new(),
            store,
            rng,
            ticks: 0,
        };
        session.new_game();
        Ok(session)
    }

    /// Reset counters, load the high score and start level 1
    pub fn new_game(&mut self) {
        self.level = 0;
        self.lives = self.tuning.lives;
        self.score = 0;
        self.world.ship = Ship::spawn(&self.tuning);
        self.input.clear();
        self.high_score = HighScore::load(&self.store);
        log::info!("New game (high score {})", self.high_score);
        self.new_level();
    }

    fn new_level(&mut self) {
        self.banner = Banner::show(format!("Level {}", self.level + 1));
        self.world.asteroids =
            generate_belt(self.level, &self.world.ship, &self.tuning, &mut self.rng);
        log::info!(
            "Level {} started with {} asteroids",
            self.level + 1,
            self.world.asteroids.len()
        );
    }

    fn game_over(&mut self) {
        let ship = &mut self.world.ship;
        ship.dead = true;
        ship.rotation = 0.0;
        ship.thrusting = false;
        self.banner = Banner::show("Game Over");
        log::info!("Game over at level {} with {} points", self.level + 1, self.score);
    }

    /// Run one simulation tick and apply its bookkeeping.
    ///
    /// Returns the simulation events followed by the session events they
    /// caused.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        self.ticks += 1;
        let input = self.input.take();
        let mut events = sim::tick(
            &mut self.world,
            self.level,
            &input,
            &self.tuning,
            &mut self.rng,
        );

        let mut follow_up = Vec::new();
        for event in &events {
            match event {
                GameEvent::AsteroidDestroyed { points, .. } => {
                    self.score += points;
                    if self.score > self.high_score {
                        self.high_score = self.score;
                        HighScore::save(&mut self.store, self.high_score);
                        follow_up.push(GameEvent::NewHighScore {
                            score: self.high_score,
                        });
                    }
                }
                GameEvent::ShipDestroyed => {
                    self.lives = self.lives.saturating_sub(1);
                    follow_up.push(GameEvent::LifeLost {
                        remaining: self.lives,
                    });
                    if self.lives == 0 {
                        self.game_over();
                        follow_up.push(GameEvent::GameOver { score: self.score });
                    } else {
                        self.world.ship = Ship::spawn(&self.tuning);
                    }
                }
                GameEvent::LevelCleared => {
                    self.level += 1;
                    self.new_level();
                    follow_up.push(GameEvent::LevelStarted { level: self.level });
                }
                _ => {}
            }
        }
        events.extend(follow_up);

        if self.banner.is_visible() {
            self.banner.alpha -= self.tuning.banner_fade_per_tick();
        } else if self.world.ship.dead {
            self.new_game();
            events.push(GameEvent::NewGame);
            events.push(GameEvent::LevelStarted { level: 0 });
        }

        events
    }

    // === Input ===

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn set_rotate(&mut self, rotate: Rotation) {
        self.input.set_rotate(rotate);
    }

    pub fn set_thrust(&mut self, thrust: bool) {
        self.input.set_thrust(thrust);
    }

    pub fn request_fire(&mut self) {
        self.input.request_fire();
    }

    pub fn release_fire(&mut self) {
        self.input.release_fire();
    }

    pub fn press(&mut self, action: Action) {
        self.input.press(action);
    }

    pub fn release(&mut self, action: Action) {
        self.input.release(action);
    }

    // === Read-only state ===

    pub fn phase(&self) -> GamePhase {
        let ship = &self.world.ship;
        if ship.dead {
            GamePhase::GameOver
        } else if ship.is_exploding() {
            GamePhase::ShipExploding
        } else {
            GamePhase::Playing
        }
    }

    pub fn scene(&self) -> Scene<'_> {
        let ship = &self.world.ship;
        Scene {
            playfield: self.tuning.bounds(),
            phase: self.phase(),
            ship,
            ship_visible: ship.is_visible(),
            ship_outline: ship.outline(),
            asteroids: &self.world.asteroids,
            asteroid_outlines: self.world.asteroids.iter().map(Asteroid::outline).collect(),
            projectiles: &ship.projectiles,
            score: self.score,
            high_score: self.high_score,
            lives: self.lives,
            level: self.level,
            banner: self.banner(),
        }
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.is_visible().then_some(&self.banner)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct playfield access for hosts that script scenarios
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn ship(&self) -> &Ship {
        &self.world.ship
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.world.asteroids
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    /// Ticks run since the session was created
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
