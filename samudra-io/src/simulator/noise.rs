//! Random source for the instrument simulation
//!
//! Uniform jitter with deterministic seeding support.

use rand::prelude::*;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Uniform};

/// Noise generator with configurable seed for reproducibility
#[derive(Clone)]
pub struct NoiseGenerator {
    rng: SmallRng,
}

impl NoiseGenerator {
    /// Create a new noise generator
    ///
    /// If seed is 0, uses random entropy for non-deterministic behavior.
    /// Otherwise, uses the provided seed for reproducible results.
    pub fn new(seed: u64) -> Self {
        let rng = if seed == 0 {
            SmallRng::from_entropy()
        } else {
            SmallRng::seed_from_u64(seed)
        };
        Self { rng }
    }

    /// Uniform random value in `[low, high]`
    ///
    /// Returns `low` when the range is empty or inverted.
    #[inline]
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        Uniform::new_inclusive(low, high).sample(&mut self.rng)
    }

    /// Symmetric jitter in `[-amplitude, +amplitude]`
    #[inline]
    pub fn jitter(&mut self, amplitude: f64) -> f64 {
        self.uniform(-amplitude, amplitude)
    }
}
