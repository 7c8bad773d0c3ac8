//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the sequence controller
//! against mock adapters.  All tests run on the host with no real
//! hardware required.

mod alarm_tests;
mod happy_path_tests;
mod mock_hw;
