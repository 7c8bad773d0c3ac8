//! Hardware adapter — bridges the panel devices to domain port traits.
//!
//! Owns every lamp, the lock, the door contact, the two edge latches and
//! the sounder, exposing them through [`SensorPort`] and [`ActuatorPort`].
//! This is the explicit hardware context: it is built once from
//! [`PanelPins`] and handed to the controller, never reached through a
//! global.

use crate::app::ports::{ActuatorPort, AlarmSounder, DigitalInput, DigitalOutput, SensorPort};
use crate::drivers::edge::EdgeLatch;
use crate::drivers::output::OutputDevice;
use crate::drivers::sounder::{SounderDriver, SounderMode};
use crate::fsm::context::{Light, SensorSnapshot};

/// Raw lines for one panel, before wrapping in drivers.
pub struct PanelPins<O, I, S> {
    /// Lamps in [`Light`] order.
    pub lights: [O; Light::COUNT],
    pub lock: O,
    pub door_contact: I,
    pub motion: I,
    pub button: I,
    pub sounder: S,
}

/// Concrete adapter that combines all panel hardware behind port traits.
pub struct HardwareAdapter<O, I, S> {
    lights: [OutputDevice<O>; Light::COUNT],
    lock: OutputDevice<O>,
    door_contact: I,
    motion: EdgeLatch<I>,
    button: EdgeLatch<I>,
    sounder: SounderDriver<S>,
}

impl<O, I, S> HardwareAdapter<O, I, S>
where
    O: DigitalOutput,
    I: DigitalInput,
    S: AlarmSounder,
{
    pub fn new(pins: PanelPins<O, I, S>) -> Self {
        Self {
            lights: pins.lights.map(OutputDevice::new),
            lock: OutputDevice::new(pins.lock),
            door_contact: pins.door_contact,
            motion: EdgeLatch::new(pins.motion),
            button: EdgeLatch::new(pins.button),
            sounder: SounderDriver::new(pins.sounder),
        }
    }

    pub fn sounder_mode(&self) -> SounderMode {
        self.sounder.mode()
    }

    pub fn sounder(&self) -> &S {
        self.sounder.sounder()
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<O, I, S> SensorPort for HardwareAdapter<O, I, S>
where
    O: DigitalOutput,
    I: DigitalInput,
    S: AlarmSounder,
{
    fn read_all(&mut self) -> SensorSnapshot {
        let button_pressed = self.button.poll_rising_edge();
        let motion_rising = self.motion.poll_rising_edge();
        SensorSnapshot {
            button_pressed,
            motion: self.motion.level(),
            motion_rising,
            door_closed: self.door_contact.read(),
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<O, I, S> ActuatorPort for HardwareAdapter<O, I, S>
where
    O: DigitalOutput,
    I: DigitalInput,
    S: AlarmSounder,
{
    fn set_light(&mut self, light: Light, on: bool) {
        self.lights[light.index()].set(on);
    }

    fn is_light_on(&self, light: Light) -> bool {
        self.lights[light.index()].is_on()
    }

    fn set_lock(&mut self, engaged: bool) {
        self.lock.set(engaged);
    }

    fn is_lock_engaged(&self) -> bool {
        self.lock.is_on()
    }

    fn sound(&mut self, mode: SounderMode) {
        self.sounder.set_mode(mode);
    }

    fn safe_state(&mut self) {
        for lamp in &mut self.lights {
            lamp.set(false);
        }
        self.lock.set(true);
        self.sounder.force_silence();
    }
}
