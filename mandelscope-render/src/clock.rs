use std::time::Instant;

/// A monotonic tick counter and its rate.
pub trait FrameClock {
    /// Current tick count. Never decreases.
    fn ticks(&self) -> u64;

    /// Ticks per second.
    fn frequency(&self) -> u64;
}

/// [`FrameClock`] backed by [`Instant`], counting nanoseconds since creation.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for MonotonicClock {
    fn ticks(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }

    fn frequency(&self) -> u64 {
        1_000_000_000
    }
}

/// Seconds between two tick readings.
#[inline]
pub fn delta_seconds(last: u64, now: u64, frequency: u64) -> f64 {
    if frequency == 0 {
        return 0.0;
    }
    now.saturating_sub(last) as f64 / frequency as f64
}
