//! Randomness capability injected into simulated users.
//!
//! The scenario logic never reaches for an ambient global RNG; each user is
//! handed a [`RangeSource`] at construction time so tests can substitute a
//! deterministic, seeded source.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Uniform random draws needed by a simulated user.
pub trait RangeSource: Send {
    /// Uniform integer in the half-open range `[lo, hi)`.
    fn next_in(&mut self, lo: u32, hi: u32) -> u32;

    /// Uniform value in `[0, 1)`.
    fn next_fraction(&mut self) -> f64;
}

/// Default source backed by the calling thread's RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRange;

impl RangeSource for ThreadRange {
    fn next_in(&mut self, lo: u32, hi: u32) -> u32 {
        rand::thread_rng().gen_range(lo..hi)
    }

    fn next_fraction(&mut self) -> f64 {
        rand::thread_rng().gen()
    }
}

/// Deterministic source for tests.
#[derive(Debug, Clone)]
pub struct SeededRange(SmallRng);

impl SeededRange {
    pub fn new(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl RangeSource for SeededRange {
    fn next_in(&mut self, lo: u32, hi: u32) -> u32 {
        self.0.gen_range(lo..hi)
    }

    fn next_fraction(&mut self) -> f64 {
        self.0.gen()
    }
}
