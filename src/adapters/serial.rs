//! Serial-port transport for the bench binary.
//!
//! Wraps a `serialport` handle opened with a short read timeout so that
//! [`Transport::read`] never stalls the control loop: a timeout is
//! reported as "no data".

use std::io::{self, Read, Write};

use serialport::SerialPort;

use crate::link::transport::Transport;

pub struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    pub fn new(port: Box<dyn SerialPort>) -> Self {
        Self { port }
    }
}

impl Transport for SerialTransport {
    type Error = io::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, io::Error> {
        match self.port.read(buf) {
            Ok(n) => Ok(n),
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) => {
                Ok(0)
            }
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, io::Error> {
        self.port.write(data)
    }

    fn flush(&mut self) -> Result<(), io::Error> {
        self.port.flush()
    }
}
