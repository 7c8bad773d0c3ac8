//! Observable state vector and change-driven reporting.
//!
//! Wire format, one line per change:
//! ```text
//!  idx  0      1   2   3   4   5   6   7      8     9
//!      phase  oR  oY  oG  iR  iY  iG  motion lock  door
//! ```
//! Each position is ASCII `'0'` or `'1'`.  `phase` is `1` once the lock
//! has been handed to the inner door; `door` is `1` while the reed
//! contact is made.

use core::fmt;

use crate::fsm::context::Light;

pub const VECTOR_LEN: usize = 10;

/// Snapshot of everything the host can observe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateVector {
    pub inner_phase: bool,
    pub lights: [bool; Light::COUNT],
    pub motion: bool,
    pub lock_engaged: bool,
    pub door_closed: bool,
}

impl StateVector {
    fn bits(&self) -> [bool; VECTOR_LEN] {
        let l = &self.lights;
        [
            self.inner_phase,
            l[0],
            l[1],
            l[2],
            l[3],
            l[4],
            l[5],
            self.motion,
            self.lock_engaged,
            self.door_closed,
        ]
    }

    /// ASCII encoding without terminator.
    pub fn encode(&self) -> [u8; VECTOR_LEN] {
        self.bits().map(|b| if b { b'1' } else { b'0' })
    }

    /// Parse a telemetry line.  Rejects anything that is not exactly ten
    /// `'0'`/`'1'` characters.
    pub fn parse(line: &str) -> Option<Self> {
        let bytes = line.as_bytes();
        if bytes.len() != VECTOR_LEN {
            return None;
        }
        let mut bits = [false; VECTOR_LEN];
        for (bit, &c) in bits.iter_mut().zip(bytes) {
            *bit = match c {
                b'0' => false,
                b'1' => true,
                _ => return None,
            };
        }
        let mut lights = [false; Light::COUNT];
        lights.copy_from_slice(&bits[1..=Light::COUNT]);
        Some(Self {
            inner_phase: bits[0],
            lights,
            motion: bits[7],
            lock_engaged: bits[8],
            door_closed: bits[9],
        })
    }

    pub fn light(&self, light: Light) -> bool {
        self.lights[light.index()]
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.bits() {
            f.write_str(if b { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Remembers the last reported vector and reports only changes.
#[derive(Debug, Default)]
pub struct TelemetryTracker {
    last: StateVector,
}

impl TelemetryTracker {
    /// Starts from the all-zero vector, so any non-zero first observation
    /// is reported.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Some(v)` if `v` differs from the previous observation.
    pub fn observe(&mut self, v: StateVector) -> Option<StateVector> {
        if v == self.last {
            return None;
        }
        self.last = v;
        Some(v)
    }

    pub fn last(&self) -> &StateVector {
        &self.last
    }
}
