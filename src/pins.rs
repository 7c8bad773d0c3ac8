//! Pin assignments for the reference airlock bench.
//!
//! Single source of truth: adapters label their pins from this module
//! rather than hard-coding numbers.  The inner and outer doors share one
//! lock and one reed contact; only the lamps are duplicated.

// ---------------------------------------------------------------------------
// Outer door lamps
// ---------------------------------------------------------------------------

pub const OUTER_GREEN: u8 = 11;
pub const OUTER_YELLOW: u8 = 12;
pub const OUTER_RED: u8 = 13;

// ---------------------------------------------------------------------------
// Inner door lamps
// ---------------------------------------------------------------------------

pub const INNER_GREEN: u8 = 8;
pub const INNER_YELLOW: u8 = 9;
pub const INNER_RED: u8 = 10;

// ---------------------------------------------------------------------------
// Shared door hardware
// ---------------------------------------------------------------------------

/// Electromagnetic lock: HIGH = engaged.
pub const DOOR_LOCK: u8 = 6;
/// Reed contact: HIGH = magnet present (door shut).
pub const DOOR_CONTACT: u8 = 3;

// ---------------------------------------------------------------------------
// Chamber sensors and operator input
// ---------------------------------------------------------------------------

/// Passive-infrared motion detector: HIGH = motion.
pub const MOTION: u8 = 4;
/// Override push-button, active LOW with internal pull-up.
pub const OVERRIDE_BUTTON: u8 = 2;
/// Piezo sounder driven with a tone generator.
pub const SOUNDER: u8 = 5;
