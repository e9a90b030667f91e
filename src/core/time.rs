//! Tick time tracking

use std::time::Duration;

/// Time state advanced once per logical tick
#[derive(Debug, Clone, Default)]
pub struct Time {
    /// Duration of the last tick
    delta: Duration,
    /// Total time since start
    elapsed: Duration,
    /// Number of ticks advanced
    frame_count: u64,
}

impl Time {
    /// Create a time tracker at zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one tick of length `delta`
    pub fn advance(&mut self, delta: Duration) {
        self.delta = delta;
        self.elapsed += delta;
        self.frame_count += 1;
    }

    #[must_use]
    pub const fn delta(&self) -> Duration {
        self.delta
    }

    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Get total elapsed time in seconds
    #[must_use]
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed.as_secs_f32()
    }

    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
