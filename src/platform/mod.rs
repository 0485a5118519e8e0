//! Platform glue: driving the simulation at a fixed rate
//!
//! Hosts call [`TickClock::advance`] with wall-clock time from whatever
//! timer they have (requestAnimationFrame, a sleep loop) and run the
//! returned number of ticks.

use crate::consts::MAX_SUBSTEPS;

/// Fixed-step accumulator
#[derive(Debug, Clone)]
pub struct TickClock {
    step: f32,
    accumulator: f32,
    max_substeps: u32,
}

impl TickClock {
    pub fn new(fps: f32) -> Self {
        Self {
            step: 1.0 / fps,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    /// Seconds per tick
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add elapsed wall time and return how many ticks are due.
    ///
    /// At most `MAX_SUBSTEPS` ticks are returned per call; backlog beyond
    /// that is dropped so a stalled host cannot spiral.
    pub fn advance(&mut self, elapsed_secs: f32) -> u32 {
        self.accumulator += elapsed_secs.clamp(0.0, 0.25);

        let mut due = 0;
        while self.accumulator >= self.step && due < self.max_substeps {
            self.accumulator -= self.step;
            due += 1;
        }
        if due == self.max_substeps && self.accumulator >= self.step {
            log::debug!("Dropping {:.3}s of simulation backlog", self.accumulator);
            self.accumulator %= self.step;
        }
        due
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
