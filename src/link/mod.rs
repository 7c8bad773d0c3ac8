//! Line-oriented host link.
//!
//! ```text
//!   SequenceController ──▶ HostLink ──▶ LineDecoder ──▶ Transport
//! ```
//!
//! Reads never block: [`HostLink::try_read_token`] returns `None` when no
//! complete line is buffered.  Bytes read past a full decoder queue are
//! held back and decoded on later polls, so no line is lost.  Writes are fire-and-forget; a failed write
//! is logged and forgotten.

pub mod codec;
pub mod telemetry;
pub mod token;
pub mod transport;

use crate::error::LinkError;
use codec::{LineDecoder, encode_line};
use log::{trace, warn};
use token::{MAX_TOKEN_LEN, Token};
use transport::Transport;

/// Bytes pulled from the transport per poll.
const READ_CHUNK: usize = 64;

pub struct HostLink<T> {
    transport: T,
    decoder: LineDecoder,
    /// Read bytes the decoder had no room for yet.
    backlog: heapless::Vec<u8, READ_CHUNK>,
}

impl<T> HostLink<T>
where
    T: Transport,
    LinkError: From<T::Error>,
{
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            decoder: LineDecoder::new(),
            backlog: heapless::Vec::new(),
        }
    }

    /// Next complete, trimmed line, or `None` if nothing is buffered.
    /// Performs at most one transport read, and none while held-back bytes
    /// remain.
    pub fn try_read_token(&mut self) -> Option<Token> {
        if let Some(token) = self.decoder.pop() {
            return Some(token);
        }

        if !self.backlog.is_empty() {
            let used = self.decoder.feed(&self.backlog);
            let left = self.backlog.len() - used;
            self.backlog.copy_within(used.., 0);
            self.backlog.truncate(left);
            return self.decoder.pop();
        }

        let mut scratch = [0u8; READ_CHUNK];
        match self.transport.read(&mut scratch) {
            Ok(0) => None,
            Ok(n) => {
                let used = self.decoder.feed(&scratch[..n]);
                // Cannot fail: the backlog is empty and holds a full read.
                let _ = self.backlog.extend_from_slice(&scratch[used..n]);
                self.decoder.pop()
            }
            Err(e) => {
                warn!("link read failed: {}", LinkError::from(e));
                None
            }
        }
    }

    /// Send `text` followed by a newline.
    pub fn write_token(&mut self, text: &str) {
        self.write_line(text.as_bytes());
    }

    /// Send raw line bytes followed by a newline.
    pub fn write_line(&mut self, text: &[u8]) {
        if let Err(e) = self.try_write_line(text) {
            warn!("link write failed: {e}");
        }
    }

    /// Like [`write_line`](Self::write_line) but reports the failure.
    pub fn try_write_line(&mut self, text: &[u8]) -> Result<(), LinkError> {
        let mut frame = [0u8; MAX_TOKEN_LEN + 1];
        let Some(len) = encode_line(text, &mut frame) else {
            warn!("outbound line of {} bytes too long, dropped", text.len());
            return Ok(());
        };
        trace!("link tx: {}", String::from_utf8_lossy(text));

        let mut rest = &frame[..len];
        while !rest.is_empty() {
            let n = self.transport.write(rest)?;
            if n == 0 {
                return Err(LinkError::WriteZero);
            }
            rest = &rest[n..];
        }
        self.transport.flush()?;
        Ok(())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
