//! Rotation magnitude draw.
//!
//! This is the only source of randomness in the engine. Decode and motion
//! take the drawn magnitude as plain input, so tests inject a fixed one.

use crate::config::SpinConfig;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Supplies the total rotation of the next spin, in radians.
pub trait RotationSource {
    fn next_magnitude(&mut self) -> f64;
}

/// Uniform draw in `[min_turns, max_turns)` full turns.
pub struct RandomRotation<R: Rng> {
    rng: R,
    min_rotation: f64,
    span: f64,
}

impl RandomRotation<ThreadRng> {
    /// Draws from the thread-local generator.
    pub fn from_config(config: &SpinConfig) -> Self {
        Self::with_rng(rand::thread_rng(), config)
    }
}

impl RandomRotation<StdRng> {
    /// Owned generator seeded from OS entropy; safe to move across threads.
    pub fn from_entropy(config: &SpinConfig) -> Self {
        Self::with_rng(StdRng::from_entropy(), config)
    }

    /// Reproducible draws for replays and tests.
    pub fn seeded(seed: u64, config: &SpinConfig) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), config)
    }
}

impl<R: Rng> RandomRotation<R> {
    pub fn with_rng(rng: R, config: &SpinConfig) -> Self {
        let min_rotation = config.min_rotation();
        Self {
            rng,
            min_rotation,
            span: (config.max_rotation() - min_rotation).max(0.0),
        }
    }
}

impl<R: Rng> RotationSource for RandomRotation<R> {
    fn next_magnitude(&mut self) -> f64 {
        self.min_rotation + self.rng.gen::<f64>() * self.span
    }
}

/// Replays a fixed list of magnitudes, repeating the last one.
#[derive(Debug, Clone)]
pub struct ScriptedRotation {
    magnitudes: Vec<f64>,
    cursor: usize,
}

impl ScriptedRotation {
    pub fn new(magnitudes: Vec<f64>) -> Self {
        Self {
            magnitudes,
            cursor: 0,
        }
    }
}

impl RotationSource for ScriptedRotation {
    fn next_magnitude(&mut self) -> f64 {
        let Some(last) = self.magnitudes.len().checked_sub(1) else {
            return 0.0;
        };
        let value = self.magnitudes[self.cursor.min(last)];
        self.cursor += 1;
        value
    }
}
