//! Alarm supervisor.
//!
//! The supervisor runs **every normal cycle after the FSM** and compares
//! sensor truth against the sequence's [`Intent`].  Two independent
//! conditions latch the emergency:
//!
//! 1. **Forced door**: the sequence intends the door shut but the reed
//!    contact is open.
//! 2. **Unexplained motion**: the chamber should be empty, yet motion has
//!    been continuously reported for `motion_timeout_ms` since the last
//!    motion rising edge.
//!
//! ## Emergency lifecycle
//!
//! 1. `check()` latches `emergency` and returns the [`Breach`] once.
//! 2. The controller switches every following step into the alarm branch;
//!    `check()` is not called while latched.
//! 3. The host's `Abort` token calls [`AlarmSupervisor::clear`], which
//!    unlatches and restarts the motion timer.

use crate::config::AirlockConfig;
use crate::error::Breach;
use crate::fsm::context::{Intent, SensorSnapshot};
use log::{error, info};

/// Alarm supervisor.
#[derive(Debug, Clone)]
pub struct AlarmSupervisor {
    motion_timeout_ms: u64,
    /// Latched until the host aborts.
    emergency: bool,
    /// Time of the last motion rising edge (or reset).
    motion_origin_ms: u64,
}

impl AlarmSupervisor {
    pub fn new(config: &AirlockConfig) -> Self {
        Self {
            motion_timeout_ms: u64::from(config.motion_timeout_ms),
            emergency: false,
            motion_origin_ms: 0,
        }
    }

    /// Unlatch and restart the motion timer.  Called at startup.
    pub fn reset(&mut self, now_ms: u64) {
        self.emergency = false;
        self.motion_origin_ms = now_ms;
    }

    /// Evaluate both breach conditions.  Returns `Some` only on the cycle
    /// that latches the emergency.
    pub fn check(&mut self, intent: &Intent, snap: &SensorSnapshot, now_ms: u64) -> Option<Breach> {
        let mut raised = None;

        // ── Forced door ───────────────────────────────────────────
        if !self.emergency && intent.door_closed && !snap.door_closed {
            raised = Some(Breach::ForcedDoor);
            self.emergency = true;
        }

        // ── Unexplained motion ────────────────────────────────────
        // The rising edge refreshes the timer even while latched.
        if snap.motion_rising {
            self.motion_origin_ms = now_ms;
        }
        if !self.emergency && !intent.room_occupied && snap.motion {
            let elapsed = now_ms.saturating_sub(self.motion_origin_ms);
            if elapsed >= self.motion_timeout_ms {
                raised = Some(Breach::UnexplainedMotion);
                self.emergency = true;
            }
        }

        if let Some(breach) = raised {
            error!("ALARM LATCHED: {breach}");
        }
        raised
    }

    /// Host acknowledged the alarm.
    pub fn clear(&mut self, now_ms: u64) {
        if self.emergency {
            info!("ALARM CLEARED by host");
        }
        self.reset(now_ms);
    }

    pub fn is_emergency(&self) -> bool {
        self.emergency
    }

    pub fn motion_origin_ms(&self) -> u64 {
        self.motion_origin_ms
    }
}
