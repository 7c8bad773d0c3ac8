//! System configuration parameters
//!
//! All tunable timing and tone parameters for the airlock controller.
//! Values are fixed at construction time; nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Slowest control cadence that still samples a human button press reliably.
pub const MAX_TICK_INTERVAL_MS: u32 = 100;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirlockConfig {
    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub tick_interval_ms: u32,
    /// Continuous unexplained motion tolerated before the alarm latches (milliseconds)
    pub motion_timeout_ms: u32,
    /// On/off half-period of the alarm lamp blink (milliseconds)
    pub alarm_blink_half_period_ms: u32,

    // --- Sounder ---
    /// Continuous alarm tone frequency (Hz)
    pub breach_tone_hz: u16,
    /// Phase-switch chirp frequency (Hz)
    pub chirp_tone_hz: u16,
    /// Phase-switch chirp length (milliseconds)
    pub chirp_duration_ms: u32,

    // --- Lifecycle ---
    /// Start in Idle and wait for the host's `SystemStart` token.
    pub await_system_start: bool,
}

impl Default for AirlockConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_interval_ms: 100, // 10 Hz
            motion_timeout_ms: 20_000,
            alarm_blink_half_period_ms: 100,

            // Sounder
            breach_tone_hz: 700,
            chirp_tone_hz: 200,
            chirp_duration_ms: 1000,

            // Lifecycle
            await_system_start: false,
        }
    }
}

impl AirlockConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(Error::Config("tick_interval_ms must be non-zero"));
        }
        if self.tick_interval_ms > MAX_TICK_INTERVAL_MS {
            return Err(Error::Config("tick_interval_ms must be at most 100 (10 Hz)"));
        }
        if self.motion_timeout_ms <= self.tick_interval_ms {
            return Err(Error::Config("motion_timeout_ms must exceed one tick"));
        }
        if self.alarm_blink_half_period_ms == 0 {
            return Err(Error::Config("alarm_blink_half_period_ms must be non-zero"));
        }
        if self.breach_tone_hz == 0 || self.chirp_tone_hz == 0 {
            return Err(Error::Config("tone frequencies must be non-zero"));
        }
        if self.chirp_duration_ms == 0 {
            return Err(Error::Config("chirp_duration_ms must be non-zero"));
        }
        Ok(())
    }
}
