//! Alarm lamp blink pattern.
//!
//! Square wave derived from elapsed time rather than a tick counter, so the
//! blink rate does not depend on how often the alarm branch runs.
//!
//! | Phase                          | Lamps |
//! |--------------------------------|-------|
//! | `(t - start) / half_period` even | on    |
//! | `(t - start) / half_period` odd  | off   |

pub struct AlarmBlink {
    half_period_ms: u64,
    start_ms: Option<u64>,
}

impl AlarmBlink {
    pub fn new(half_period_ms: u32) -> Self {
        Self {
            half_period_ms: u64::from(half_period_ms.max(1)),
            start_ms: None,
        }
    }

    /// Restart the pattern; the next `level()` call begins an on phase.
    pub fn reset(&mut self) {
        self.start_ms = None;
    }

    /// Lamp level at `now_ms`.
    pub fn level(&mut self, now_ms: u64) -> bool {
        let start = *self.start_ms.get_or_insert(now_ms);
        let phase = now_ms.saturating_sub(start) / self.half_period_ms;
        phase % 2 == 0
    }
}
