//! Transport abstraction — any byte-oriented channel to the host.
//!
//! Concrete implementations:
//! - UART serial port ([`SerialTransport`](crate::adapters::serial::SerialTransport), bench builds)
//! - In-memory loopback (tests)
//!
//! [`HostLink`](super::HostLink) is generic over `Transport`, so adding a
//! new channel requires zero changes to the protocol logic.

/// Byte-oriented transport channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Read up to `buf.len()` bytes into `buf`.
    /// Returns 0 if no data is available (non-blocking).
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write `data` to the transport.
    /// Returns the number of bytes actually written.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// A null transport that discards all writes and never reads.
/// Useful when running the sequence without a host attached.
pub struct NullTransport;

impl Transport for NullTransport {
    type Error = core::convert::Infallible;

    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(0)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
