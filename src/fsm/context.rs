//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to.  It contains the latest sensor snapshot, the host command
//! received this cycle, the commanded outputs, the sequence's *intended*
//! view of the world, and the outbound notices queued for the host.
//! Think of it as the "blackboard" in a blackboard architecture.

use crate::link::token::{HostCommand, Notice};

/// Capacity of the per-cycle outbound notice queue.
pub const OUTBOX_CAP: usize = 4;

// ---------------------------------------------------------------------------
// Indicator lamps
// ---------------------------------------------------------------------------

/// The six indicator lamps, in telemetry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Light {
    OuterRed = 0,
    OuterYellow = 1,
    OuterGreen = 2,
    InnerRed = 3,
    InnerYellow = 4,
    InnerGreen = 5,
}

impl Light {
    pub const COUNT: usize = 6;

    /// Every lamp, in telemetry order.
    pub const ALL: [Light; Light::COUNT] = [
        Light::OuterRed,
        Light::OuterYellow,
        Light::OuterGreen,
        Light::InnerRed,
        Light::InnerYellow,
        Light::InnerGreen,
    ];

    /// Lamps that blink while the alarm is latched.
    pub const ALARM: [Light; 4] = [
        Light::OuterRed,
        Light::InnerRed,
        Light::OuterYellow,
        Light::InnerYellow,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// Sensor snapshot (read-only to state handlers; written by the controller)
// ---------------------------------------------------------------------------

/// One cycle's worth of sensor input.  The edge flags come from the single
/// shared [`EdgeLatch`](crate::drivers::edge::EdgeLatch) per physical
/// sensor and are sampled exactly once per cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorSnapshot {
    /// Override button went from released to pressed since the last cycle.
    pub button_pressed: bool,
    /// Motion detector currently reports motion.
    pub motion: bool,
    /// Motion detector went from quiet to active since the last cycle.
    pub motion_rising: bool,
    /// Reed contact is made (door shut).
    pub door_closed: bool,
}

// ---------------------------------------------------------------------------
// Actuator commands (written by state handlers; applied by the controller)
// ---------------------------------------------------------------------------

/// Outputs the state handlers want driven.  Applied to the hardware after
/// every FSM tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorCommands {
    /// Lamp levels indexed by [`Light::index`].
    pub lights: [bool; Light::COUNT],
    /// Door lock energised.
    pub lock_engaged: bool,
    /// One-shot request for the phase-switch chirp.
    pub chirp: bool,
}

impl Default for ActuatorCommands {
    fn default() -> Self {
        Self::safe()
    }
}

impl ActuatorCommands {
    /// All lamps dark, lock engaged.
    pub fn safe() -> Self {
        Self {
            lights: [false; Light::COUNT],
            lock_engaged: true,
            chirp: false,
        }
    }

    pub fn set(&mut self, light: Light, on: bool) {
        self.lights[light.index()] = on;
    }

    pub fn is_on(&self, light: Light) -> bool {
        self.lights[light.index()]
    }
}

// ---------------------------------------------------------------------------
// Intended world state
// ---------------------------------------------------------------------------

/// What the sequence believes the sensors *should* read.  The alarm
/// supervisor compares sensor truth against this every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intent {
    pub door_closed: bool,
    pub room_occupied: bool,
}

impl Default for Intent {
    fn default() -> Self {
        Self {
            door_closed: true,
            room_occupied: false,
        }
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
#[derive(Debug, Default)]
pub struct FsmContext {
    // -- Inputs --
    /// Latest sensor readings.  Updated before each FSM tick.
    pub sensors: SensorSnapshot,
    /// Recognised host command received this cycle, if any.
    pub inbound: Option<HostCommand>,

    // -- Outputs --
    /// Commands to be applied to the hardware after the FSM tick.
    pub commands: ActuatorCommands,
    /// Notices to send to the host after the FSM tick.
    pub outbox: heapless::Vec<Notice, OUTBOX_CAP>,

    // -- Sequence beliefs --
    pub intent: Intent,
    /// `false` while the shared lock/contact act for the outer door,
    /// `true` after the phase switch hands them to the inner door.
    pub inner_phase: bool,
}

impl FsmContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notice for the host.  The queue is drained every cycle, so
    /// overflow indicates a handler bug; the notice is dropped and logged.
    pub fn notify(&mut self, notice: Notice) {
        if self.outbox.push(notice).is_err() {
            log::warn!("outbox full, dropping {:?}", notice);
        }
    }

    /// Take the command received this cycle if it matches `expected`.
    pub fn take_command(&mut self, expected: HostCommand) -> bool {
        if self.inbound == Some(expected) {
            self.inbound = None;
            true
        } else {
            false
        }
    }
}
