//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the sequencing rules for the airlock: FSM
//! orchestration, alarm supervision and host reporting.  All interaction
//! with hardware happens through **port traits** defined in [`ports`],
//! keeping this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
