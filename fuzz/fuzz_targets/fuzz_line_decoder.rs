//! Fuzz target: `LineDecoder::feed`
//!
//! Drives arbitrary byte sequences, split at an arbitrary point, into the
//! streaming line decoder and asserts that every token it yields is
//! non-empty, trimmed and within capacity.
//!
//! cargo fuzz run fuzz_line_decoder

#![no_main]

use airlock::link::codec::LineDecoder;
use airlock::link::token::{HostCommand, MAX_TOKEN_LEN};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let cut = usize::from(split).min(rest.len());
    let (head, tail) = rest.split_at(cut);

    let mut decoder = LineDecoder::new();
    for part in [head, tail] {
        let mut rest = part;
        loop {
            let used = decoder.feed(rest);
            rest = &rest[used..];
            while let Some(token) = decoder.pop() {
                assert!(!token.is_empty(), "decoder yielded a blank line");
                assert!(token.len() <= MAX_TOKEN_LEN, "token exceeds capacity");
                assert_eq!(token.trim(), token.as_str(), "token not trimmed");
                let _ = HostCommand::parse(&token);
            }
            if rest.is_empty() {
                break;
            }
        }
    }

    // After a reset the decoder must accept bytes cleanly again.
    decoder.reset();
    decoder.feed(data);
    assert!(decoder.pop().map_or(true, |t| !t.is_empty()));
});
