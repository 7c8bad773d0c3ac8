//! embedded-hal pin adapters.
//!
//! Wrap any `embedded_hal::digital` pin as a domain [`DigitalOutput`] or
//! [`DigitalInput`], applying polarity and absorbing pin faults:
//!
//! - a failed write is logged; the driver above still records the
//!   commanded level and re-drives it next cycle.
//! - a failed read is logged and the last good level is returned.

use embedded_hal::digital::{Error as _, InputPin, OutputPin};
use log::warn;

use crate::app::ports::{DigitalInput, DigitalOutput};
use crate::error::PinError;

// ── Output ────────────────────────────────────────────────────

pub struct HalOutput<P> {
    pin: P,
    gpio: u8,
    active_low: bool,
}

impl<P: OutputPin> HalOutput<P> {
    pub fn new(pin: P, gpio: u8) -> Self {
        Self {
            pin,
            gpio,
            active_low: false,
        }
    }

    /// Drive the line LOW for `on`.
    pub fn active_low(mut self) -> Self {
        self.active_low = true;
        self
    }

    pub fn try_set(&mut self, on: bool) -> Result<(), PinError> {
        let high = on != self.active_low;
        let res = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|e| {
            warn!("GPIO{}: {} ({:?})", self.gpio, PinError::WriteFailed, e.kind());
            PinError::WriteFailed
        })
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }
}

impl<P: OutputPin> DigitalOutput for HalOutput<P> {
    fn set(&mut self, on: bool) {
        // Already logged; the level is re-driven next cycle.
        let _ = self.try_set(on);
    }
}

// ── Input ─────────────────────────────────────────────────────

pub struct HalInput<P> {
    pin: P,
    gpio: u8,
    active_low: bool,
    last: bool,
}

impl<P: InputPin> HalInput<P> {
    pub fn new(pin: P, gpio: u8) -> Self {
        Self {
            pin,
            gpio,
            active_low: false,
            last: false,
        }
    }

    /// Report active while the line reads LOW (pull-up switches).
    pub fn active_low(mut self) -> Self {
        self.active_low = true;
        self
    }

    pub fn try_read(&mut self) -> Result<bool, PinError> {
        match self.pin.is_high() {
            Ok(high) => {
                self.last = high != self.active_low;
                Ok(self.last)
            }
            Err(e) => {
                warn!("GPIO{}: {} ({:?})", self.gpio, PinError::ReadFailed, e.kind());
                Err(PinError::ReadFailed)
            }
        }
    }
}

impl<P: InputPin> DigitalInput for HalInput<P> {
    fn read(&mut self) -> bool {
        self.try_read().unwrap_or(self.last)
    }
}
