//! On/off output with a readable last-commanded level.
//!
//! Wraps any [`DigitalOutput`] line.  Writes are always forwarded so a
//! glitched pin is re-driven on the next cycle; the cached level is what
//! telemetry reports.

use crate::app::ports::DigitalOutput;

pub struct OutputDevice<O> {
    line: O,
    on: bool,
}

impl<O: DigitalOutput> OutputDevice<O> {
    /// Wrap `line` and drive it low.
    pub fn new(mut line: O) -> Self {
        line.set(false);
        Self { line, on: false }
    }

    pub fn set(&mut self, on: bool) {
        self.line.set(on);
        self.on = on;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn line(&self) -> &O {
        &self.line
    }
}
