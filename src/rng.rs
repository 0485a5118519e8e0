//! Random source for asteroid generation
//!
//! Only asteroid spawning draws random numbers. Games run unseeded by
//! default; tests and replays inject a seeded or scripted source instead.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Supplies uniform floats in [0, 1)
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;

    /// Uniform float in [0, max)
    fn next_scaled(&mut self, max: f32) -> f32 {
        self.next_unit() * max
    }

    /// Fair coin flip mapped to a sign
    fn next_sign(&mut self) -> f32 {
        if self.next_unit() < 0.5 { 1.0 } else { -1.0 }
    }
}

/// PCG-backed source
#[derive(Debug, Clone)]
pub struct PcgSource {
    rng: Pcg32,
}

impl PcgSource {
    /// Reproducible source for replays and tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Unseeded source, the normal way to play
    pub fn from_entropy() -> Self {
        Self {
            rng: Pcg32::from_rng(&mut rand::rng()),
        }
    }
}

impl RandomSource for PcgSource {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedSource {
    /// Values are clamped into [0, 1). An empty script always yields 0.
    pub fn new(values: impl IntoIterator<Item = f32>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }

    /// Always returns the same draw
    pub fn constant(value: f32) -> Self {
        Self::new([value])
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
