//! Device drivers layered on the port capabilities.

pub mod blink;
pub mod edge;
pub mod output;
pub mod sounder;
