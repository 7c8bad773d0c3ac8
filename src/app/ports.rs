//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SequenceController (domain)
//! ```
//!
//! Two layers live here.  The narrow device capabilities
//! ([`DigitalOutput`], [`DigitalInput`], [`AlarmSounder`]) are what a pin
//! or tone-generator driver must provide.  The panel ports
//! ([`SensorPort`], [`ActuatorPort`]) are what the
//! [`SequenceController`](super::service::SequenceController) consumes;
//! the [`HardwareAdapter`](crate::adapters::hardware::HardwareAdapter)
//! builds them out of the device capabilities.
//!
//! Device capabilities are infallible from the domain's point of view:
//! adapters log and absorb pin faults (see [`PinError`](crate::error::PinError)).

use crate::drivers::sounder::SounderMode;
use crate::fsm::context::{Light, SensorSnapshot};

// ───────────────────────────────────────────────────────────────
// Device capabilities
// ───────────────────────────────────────────────────────────────

/// An on/off actuator line (lamp, lock coil).
pub trait DigitalOutput {
    fn set(&mut self, on: bool);
}

/// A polled boolean sensor line.  `true` means active after any polarity
/// correction the adapter applies.
pub trait DigitalInput {
    fn read(&mut self) -> bool;
}

/// Three-mode tone generator.
pub trait AlarmSounder {
    /// Start the continuous breach tone.
    fn play_breach(&mut self);
    /// Fire the short phase-switch chirp.  Must not block.
    fn play_chirp(&mut self);
    fn silence(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this exactly once per normal cycle.
pub trait SensorPort {
    /// Sample every sensor.  Edge flags are consumed by this call.
    fn read_all(&mut self) -> SensorSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    fn set_light(&mut self, light: Light, on: bool);

    /// Last commanded level of a lamp.
    fn is_light_on(&self, light: Light) -> bool;

    /// Energise (`true`) or release the door lock.
    fn set_lock(&mut self, engaged: bool);

    fn is_lock_engaged(&self) -> bool;

    /// Put the sounder into `mode`.
    fn sound(&mut self, mode: SounderMode);

    /// All lamps dark, lock engaged, sounder silent.
    fn safe_state(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
