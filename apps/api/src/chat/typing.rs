use std::time::Duration;

use rand::Rng;

/// Artificial "assistant is typing" pause before a reply is appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingDelay {
    min: Duration,
    max: Duration,
}

impl TypingDelay {
    /// Swaps the bounds if given in the wrong order.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }

    /// Uniform draw from `[min, max]`.
    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

impl Default for TypingDelay {
    fn default() -> Self {
        Self::from_millis(1_000, 2_000)
    }
}
