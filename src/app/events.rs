//! Outbound application events.
//!
//! The [`SequenceController`](super::service::SequenceController) emits
//! these through the [`EventSink`](super::ports::EventSink) port.  Adapters
//! on the other side decide what to do with them.

use crate::error::Breach;
use crate::fsm::StateId;
use crate::link::telemetry::StateVector;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller has been initialised (carries initial state).
    Started(StateId),

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// The observable state vector changed and was reported to the host.
    Telemetry(StateVector),

    /// The alarm supervisor latched the emergency.
    BreachDetected(Breach),

    /// The host aborted the active alarm.
    AlarmCleared,
}
