//! Airlock sequencer library.
//!
//! Exposes the pure-logic modules (FSM, alarm supervision, host link) and
//! the adapters that bind them to embedded-hal pins, for the bench binary
//! and for integration testing.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod link;
pub mod pins;
pub mod safety;
