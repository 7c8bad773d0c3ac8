//! Unified error types for the airlock controller.
//!
//! The sequencing core itself never fails: every abnormal condition it
//! cares about is a [`Breach`], which is domain state rather than an error.
//! The variants below belong to the edges of the system (pins, the host
//! link, configuration) and are all `Copy` so adapters can log and drop
//! them without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation outside the core funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A digital pin could not be read or driven.
    Pin(PinError),
    /// The host link transport failed.
    Link(LinkError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pin(e) => write!(f, "pin: {e}"),
            Self::Link(e) => write!(f, "link: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Pin errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinError {
    /// Input level could not be sampled.
    ReadFailed,
    /// Output level could not be driven.
    WriteFailed,
}

impl fmt::Display for PinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFailed => write!(f, "GPIO read failed"),
            Self::WriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

impl From<PinError> for Error {
    fn from(e: PinError) -> Self {
        Self::Pin(e)
    }
}

// ---------------------------------------------------------------------------
// Link errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// The underlying byte channel reported an I/O failure.
    Io(std::io::ErrorKind),
    /// The channel accepted zero bytes for a non-empty write.
    WriteZero,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(kind) => write!(f, "I/O error ({kind})"),
            Self::WriteZero => write!(f, "transport accepted no bytes"),
        }
    }
}

impl std::error::Error for LinkError {}

impl From<LinkError> for Error {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}

impl From<std::io::Error> for LinkError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.kind())
    }
}

impl From<core::convert::Infallible> for LinkError {
    fn from(e: core::convert::Infallible) -> Self {
        match e {}
    }
}

// ---------------------------------------------------------------------------
// Breaches
// ---------------------------------------------------------------------------

/// Intrusion conditions raised by the
/// [`AlarmSupervisor`](crate::safety::AlarmSupervisor).  Either one latches
/// the emergency state until the host sends `Abort`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breach {
    /// The sequence intends the door shut but the reed contact is open.
    ForcedDoor,
    /// Motion persisted past the timeout while the chamber should be empty.
    UnexplainedMotion,
}

impl fmt::Display for Breach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForcedDoor => write!(f, "door forced open"),
            Self::UnexplainedMotion => write!(f, "unexplained motion"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
