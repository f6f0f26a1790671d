//! Randomness source for the simulation
//!
//! Every random branch (throw cadence, ladder falls, edge drops) goes through
//! `RandomSource`, so tests can force either outcome.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform random numbers in `[0, 1)`
pub trait RandomSource: fmt::Debug {
    fn next_f32(&mut self) -> f32;

    /// True with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Uniform value in `[min, max]`
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}

/// PCG-backed source, reproducible from a seed
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { seed, rng: Pcg32::seed_from_u64(seed) }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_f32(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Always returns the same value. `FixedRandom(0.0)` makes every chance
/// succeed and every range pick its minimum; `FixedRandom(0.999)` the reverse.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f32);

impl RandomSource for FixedRandom {
    fn next_f32(&mut self) -> f32 {
        self.0
    }
}
