//! Newline-delimited line codec.
//!
//! Wire format:
//! ```text
//! ┌──────────────────────┬────┐
//! │ ASCII text (≤ 64 B)  │ \n │
//! └──────────────────────┴────┘
//! ```
//!
//! The decoder accumulates incoming bytes and queues complete, trimmed
//! lines.  A single `Transport::read` may carry part of a line, several
//! lines, or both.  Lines longer than [`MAX_TOKEN_LEN`] are discarded
//! whole, as are blank and non-UTF-8 lines.
//!
//! The decoder never drops a complete line: once the ready queue is full,
//! [`LineDecoder::feed`] stops and reports how many bytes it took, and the
//! caller holds the rest until a slot frees up.

use super::token::{MAX_TOKEN_LEN, Token};
use heapless::{Deque, Vec};
use log::debug;

/// Completed lines held between polls.
pub const QUEUE_CAP: usize = 4;

/// Streaming line decoder.
pub struct LineDecoder {
    buf: Vec<u8, MAX_TOKEN_LEN>,
    /// Current line exceeded the buffer; skip until the next terminator.
    overflow: bool,
    ready: Deque<Token, QUEUE_CAP>,
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineDecoder {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            overflow: false,
            ready: Deque::new(),
        }
    }

    /// Feed bytes into the decoder, queueing the lines they complete.
    ///
    /// Returns the number of bytes consumed.  Stops early when the ready
    /// queue is full; the remaining bytes must be fed again after a `pop`.
    pub fn feed(&mut self, data: &[u8]) -> usize {
        for (used, &byte) in data.iter().enumerate() {
            if self.ready.is_full() {
                return used;
            }
            if byte == b'\n' {
                self.finish_line();
                continue;
            }
            if self.overflow {
                continue;
            }
            if self.buf.push(byte).is_err() {
                debug!("line exceeds {MAX_TOKEN_LEN} bytes, discarding");
                self.overflow = true;
                self.buf.clear();
            }
        }
        data.len()
    }

    /// Oldest complete line, if any.
    pub fn pop(&mut self) -> Option<Token> {
        self.ready.pop_front()
    }

    /// Drop any partial line and queued tokens (e.g. after a reconnect).
    pub fn reset(&mut self) {
        self.buf.clear();
        self.overflow = false;
        self.ready.clear();
    }

    fn finish_line(&mut self) {
        let overflowed = core::mem::replace(&mut self.overflow, false);
        if overflowed {
            self.buf.clear();
            return;
        }

        let Ok(text) = core::str::from_utf8(&self.buf) else {
            debug!("non-UTF-8 line discarded");
            self.buf.clear();
            return;
        };
        let text = text.trim();
        if !text.is_empty() {
            let mut token = Token::new();
            // Cannot fail: `text` is a slice of a buffer of the same capacity.
            let _ = token.push_str(text);
            // Cannot fail: `feed` stops while the queue is full.
            let _ = self.ready.push_back(token);
        }
        self.buf.clear();
    }
}

/// Encode `text` plus terminator into `out`.  Returns the bytes written,
/// or `None` if `out` is too small.
pub fn encode_line(text: &[u8], out: &mut [u8]) -> Option<usize> {
    let total = text.len() + 1;
    if total > out.len() {
        return None;
    }
    out[..text.len()].copy_from_slice(text);
    out[text.len()] = b'\n';
    Some(total)
}
