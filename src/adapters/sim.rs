//! Simulated bench hardware.
//!
//! [`SimPin`] is an embedded-hal pin backed by a shared cell, so the bench
//! binary (or a test) can hold one clone to flip sensor levels while the
//! controller owns the other.  [`LogSounder`] stands in for the piezo
//! tone generator and logs the tone it would play.

use core::cell::Cell;
use core::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use log::{info, trace, warn};

use super::hal_pins::{HalInput, HalOutput};
use super::hardware::{HardwareAdapter, PanelPins};
use crate::app::ports::AlarmSounder;
use crate::config::AirlockConfig;
use crate::pins;

// ── Pin ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SimPin {
    gpio: u8,
    level: Rc<Cell<bool>>,
}

impl SimPin {
    /// New pin, initially LOW.
    pub fn new(gpio: u8) -> Self {
        Self {
            gpio,
            level: Rc::new(Cell::new(false)),
        }
    }

    pub fn set_level(&self, high: bool) {
        self.level.set(high);
    }

    pub fn level(&self) -> bool {
        self.level.get()
    }

    pub fn gpio(&self) -> u8 {
        self.gpio
    }
}

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl InputPin for SimPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.level.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.level.get())
    }
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        if self.level.replace(false) {
            trace!("GPIO{} -> LOW", self.gpio);
        }
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        if !self.level.replace(true) {
            trace!("GPIO{} -> HIGH", self.gpio);
        }
        Ok(())
    }
}

// ── Sounder ───────────────────────────────────────────────────

/// Sounder that logs instead of driving a tone generator.
#[derive(Debug)]
pub struct LogSounder {
    gpio: u8,
    breach_hz: u16,
    chirp_hz: u16,
    chirp_ms: u32,
    tone_hz: Option<u16>,
    chirps: u32,
}

impl LogSounder {
    pub fn new(gpio: u8, config: &AirlockConfig) -> Self {
        Self {
            gpio,
            breach_hz: config.breach_tone_hz,
            chirp_hz: config.chirp_tone_hz,
            chirp_ms: config.chirp_duration_ms,
            tone_hz: None,
            chirps: 0,
        }
    }

    /// Continuous tone currently playing.
    pub fn tone_hz(&self) -> Option<u16> {
        self.tone_hz
    }

    /// Number of chirps fired so far.
    pub fn chirps(&self) -> u32 {
        self.chirps
    }

    pub fn gpio(&self) -> u8 {
        self.gpio
    }
}

impl AlarmSounder for LogSounder {
    fn play_breach(&mut self) {
        warn!("GPIO{} SOUNDER | breach tone {} Hz", self.gpio, self.breach_hz);
        self.tone_hz = Some(self.breach_hz);
    }

    fn play_chirp(&mut self) {
        info!(
            "GPIO{} SOUNDER | chirp {} Hz for {} ms",
            self.gpio, self.chirp_hz, self.chirp_ms
        );
        self.chirps += 1;
    }

    fn silence(&mut self) {
        if self.tone_hz.take().is_some() {
            info!("GPIO{} SOUNDER | silent", self.gpio);
        }
    }
}

// ── Bench panel ───────────────────────────────────────────────

/// The full simulated panel as the controller sees it.
pub type SimPanel = HardwareAdapter<HalOutput<SimPin>, HalInput<SimPin>, LogSounder>;

/// Handles on the simulated sensor lines, wired like the reference bench.
#[derive(Debug, Clone)]
pub struct SimSensors {
    pub door_contact: SimPin,
    pub motion: SimPin,
    /// Active LOW: idle HIGH through the pull-up.
    pub button: SimPin,
}

impl SimSensors {
    pub fn set_door_closed(&self, closed: bool) {
        self.door_contact.set_level(closed);
    }

    pub fn set_motion(&self, active: bool) {
        self.motion.set_level(active);
    }

    pub fn set_button_held(&self, held: bool) {
        self.button.set_level(!held);
    }
}

/// Build a simulated panel: door shut, no motion, button released.
pub fn sim_panel(config: &AirlockConfig) -> (SimPanel, SimSensors) {
    let sensors = SimSensors {
        door_contact: SimPin::new(pins::DOOR_CONTACT),
        motion: SimPin::new(pins::MOTION),
        button: SimPin::new(pins::OVERRIDE_BUTTON),
    };
    sensors.set_door_closed(true);
    sensors.set_button_held(false);

    let lamp = |gpio| HalOutput::new(SimPin::new(gpio), gpio);
    let panel = HardwareAdapter::new(PanelPins {
        lights: [
            lamp(pins::OUTER_RED),
            lamp(pins::OUTER_YELLOW),
            lamp(pins::OUTER_GREEN),
            lamp(pins::INNER_RED),
            lamp(pins::INNER_YELLOW),
            lamp(pins::INNER_GREEN),
        ],
        lock: lamp(pins::DOOR_LOCK),
        door_contact: HalInput::new(sensors.door_contact.clone(), pins::DOOR_CONTACT),
        motion: HalInput::new(sensors.motion.clone(), pins::MOTION),
        button: HalInput::new(sensors.button.clone(), pins::OVERRIDE_BUTTON).active_low(),
        sounder: LogSounder::new(pins::SOUNDER, config),
    });
    (panel, sensors)
}
