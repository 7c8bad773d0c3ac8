//! Single-shot rising-edge detector.
//!
//! One `EdgeLatch` exists per physical sensor and is sampled exactly once
//! per cycle by the hardware adapter; every consumer (FSM handlers and the
//! alarm supervisor) reads the resulting flag from the
//! [`SensorSnapshot`](crate::fsm::context::SensorSnapshot) instead of
//! polling the pin again.

use crate::app::ports::DigitalInput;

pub struct EdgeLatch<I> {
    input: I,
    last: bool,
}

impl<I: DigitalInput> EdgeLatch<I> {
    /// The recorded level starts inactive, so an input already held
    /// active reports one edge on the first poll.
    pub fn new(input: I) -> Self {
        Self { input, last: false }
    }

    /// Sample the input.  Returns `true` only on an inactive → active
    /// change since the previous poll; always records the new level.
    pub fn poll_rising_edge(&mut self) -> bool {
        let now = self.input.read();
        let rising = now && !self.last;
        self.last = now;
        rising
    }

    /// Level recorded by the most recent poll.
    pub fn level(&self) -> bool {
        self.last
    }
}
