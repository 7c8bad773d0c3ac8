//! Monotonic clock adapter.
//!
//! Supplies the millisecond timestamps passed to
//! [`SequenceController::step`](crate::app::service::SequenceController::step).

use std::time::Instant;

/// Milliseconds since construction, from `std::time::Instant`.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Milliseconds since the clock was created (monotonic).
    pub fn now_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
