//! Browser bindings
//!
//! The page owns the canvas, the key listeners and the animation frame
//! loop. It forwards key names and frame timestamps here and draws whatever
//! `scene_json` describes.

use wasm_bindgen::prelude::*;

use crate::input::Action;
use crate::persistence::LocalStore;
use crate::platform::TickClock;
use crate::rng::PcgSource;
use crate::session::Session;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier module instance
        return;
    }
    log::info!("Asteroid Belt starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session<LocalStore, PcgSource>,
    clock: TickClock,
    last_time: f64,
}

#[wasm_bindgen]
impl WebGame {
    /// Game with default tuning
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebGame, JsError> {
        Self::build(Tuning::default())
    }

    /// Game with tuning overrides given as JSON
    pub fn with_tuning(json: &str) -> Result<WebGame, JsError> {
        Self::build(Tuning::from_json(json)?)
    }

    fn build(tuning: Tuning) -> Result<WebGame, JsError> {
        let clock = TickClock::new(tuning.fps);
        let session = Session::with_entropy(tuning, LocalStore::open())?;
        Ok(WebGame {
            session,
            clock,
            last_time: 0.0,
        })
    }

    /// Feed a requestAnimationFrame timestamp (milliseconds). Returns the
    /// number of ticks run.
    pub fn frame(&mut self, time_ms: f64) -> u32 {
        let dt = if self.last_time > 0.0 {
            ((time_ms - self.last_time) / 1000.0) as f32
        } else {
            self.clock.step()
        };
        self.last_time = time_ms;

        let due = self.clock.advance(dt);
        for _ in 0..due {
            for event in self.session.tick() {
                log::debug!("{:?}", event);
            }
        }
        due
    }

    /// Run exactly one tick
    pub fn tick(&mut self) {
        self.session.tick();
    }

    /// Returns false for names that map to no control
    pub fn press(&mut self, action: &str) -> bool {
        match Action::from_str(action) {
            Some(action) => {
                self.session.press(action);
                true
            }
            None => false,
        }
    }

    pub fn release(&mut self, action: &str) -> bool {
        match Action::from_str(action) {
            Some(action) => {
                self.session.release(action);
                true
            }
            None => false,
        }
    }

    /// Drop wall-clock backlog, e.g. after the tab was hidden
    pub fn resync(&mut self) {
        self.clock.reset();
        self.last_time = 0.0;
    }

    pub fn scene_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(&self.session.scene())?)
    }

    pub fn score(&self) -> f64 {
        self.session.score() as f64
    }

    pub fn high_score(&self) -> f64 {
        self.session.high_score() as f64
    }

    pub fn lives(&self) -> u32 {
        self.session.lives()
    }

    pub fn level(&self) -> u32 {
        self.session.level()
    }
}
