//! Think-time policy between successive task executions.

use crate::rand_source::RangeSource;
use std::time::Duration;

/// Uniform delay in `[min, max]` a simulated user waits between iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkTime {
    min: Duration,
    max: Duration,
}

impl ThinkTime {
    pub fn between(min: Duration, max: Duration) -> Self {
        debug_assert!(min <= max);
        Self { min, max }
    }

    /// Draw the next delay from the injected randomness source.
    pub fn pick(&self, rng: &mut dyn RangeSource) -> Duration {
        let spread = self.max - self.min;
        self.min + spread.mul_f64(rng.next_fraction())
    }
}
