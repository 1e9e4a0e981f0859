//! Simulated network latency.

use rand::Rng;
use std::time::Duration;

/// Uniform delay applied before a query resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    min: Duration,
    max: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self::new(Duration::from_millis(50), Duration::from_millis(150))
    }
}

impl Latency {
    /// Delay in `[min, max]`. Bounds given in the wrong order are swapped.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// No delay at all.
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn is_zero(&self) -> bool {
        self.max.is_zero()
    }

    /// Draw one delay.
    ///
    /// Uses the thread RNG; latency never feeds into generated data.
    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        let min = self.min.as_micros() as u64;
        let max = self.max.as_micros() as u64;
        Duration::from_micros(rand::rng().random_range(min..=max))
    }

    pub async fn sleep(&self) {
        if self.is_zero() {
            return;
        }
        tokio::time::sleep(self.sample()).await;
    }
}
