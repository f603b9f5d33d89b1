//! Streaming tokenizer
//!
//! Splits the raw input stream into three token kinds: runs of plain
//! text, single control characters (newline, carriage return, backspace,
//! bell) and complete escape sequences. Input arrives in arbitrary
//! chunks with no guarantee of sequence alignment, so an unterminated
//! escape sequence is held back and classification resumes on the next
//! feed. Bytes are decoded as streaming UTF-8: an incomplete multi-byte
//! character at a chunk boundary is likewise held until its continuation
//! arrives.
//!
//! Sequence completion rules, by class:
//! - two-character sequences whose second character falls in 0x60-0x7E
//!   (independent functions) or 0x30-0x3F (private use) are complete
//! - `ESC (` takes exactly one more character
//! - CSI (`ESC [`) completes at the first character in 0x40-0x7E, with
//!   `[` itself excluded as a terminator

use std::collections::VecDeque;

use tracing::{trace, warn};

use super::ascii::{self, BEL, BS, CR, ESC, NL};

/// Cap on a buffered-but-unterminated sequence; anything longer is
/// flushed to the decoder (and classified as unsupported) so adversarial
/// input cannot grow the buffer without bound.
const MAX_PENDING_SEQUENCE: usize = 64;

/// One atomic unit of terminal input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A maximal run of plain text
    Text(String),
    /// A single control character: NL, CR, BS or BEL
    Control(char),
    /// One escape sequence, introducer through terminator
    Escape(String),
}

/// Streaming tokenizer with partial-sequence hold-back
#[derive(Debug, Default)]
pub struct Tokenizer {
    /// Characters waiting to be scanned
    input: VecDeque<char>,
    /// The run being accumulated: plain text, or an escape sequence when
    /// it starts with ESC
    seq: String,
    /// Trailing bytes of an incomplete UTF-8 character
    utf8_tail: Vec<u8>,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all buffered input, including held partial sequences
    pub fn clear(&mut self) {
        self.input.clear();
        self.seq.clear();
        self.utf8_tail.clear();
    }

    /// Append text to the pending input
    pub fn feed_str(&mut self, s: &str) {
        self.input.extend(s.chars());
    }

    /// Append raw bytes, decoding them as streaming UTF-8. Invalid bytes
    /// become U+FFFD; an incomplete trailing character is held for the
    /// next feed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) {
        let mut buf = std::mem::take(&mut self.utf8_tail);
        buf.extend_from_slice(bytes);

        let mut rest = buf.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    self.input.extend(valid.chars());
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    // Safe: split at a validated boundary
                    self.input
                        .extend(std::str::from_utf8(valid).unwrap_or_default().chars());
                    match err.error_len() {
                        Some(bad) => {
                            warn!(len = bad, "invalid UTF-8 replaced");
                            self.input.push_back(char::REPLACEMENT_CHARACTER);
                            rest = &after[bad..];
                        }
                        None => {
                            // Incomplete trailing character, hold it back
                            self.utf8_tail = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Take the accumulated run as a token, classifying by its first
    /// character
    fn take_seq(&mut self) -> Token {
        let seq = std::mem::take(&mut self.seq);
        if seq.starts_with(ESC) {
            Token::Escape(seq)
        } else {
            Token::Text(seq)
        }
    }
}

/// True when a buffered escape sequence has seen its terminator
fn is_terminated(seq: &str) -> bool {
    let len = seq.chars().count();
    if len <= 1 {
        return false;
    }
    let second = seq.chars().nth(1).unwrap_or('\0');
    let last = seq.chars().last().unwrap_or('\0');

    if len == 2 && (('\x30'..='\x3f').contains(&second) || ('\x60'..='\x7e').contains(&second)) {
        return true;
    }
    if len == 3 && second == '(' {
        return true;
    }
    // CSI: terminated by 0x40-0x7E, with '[' excluded
    second == '[' && last != '[' && ('\x40'..='\x7e').contains(&last)
}

impl Iterator for Tokenizer {
    type Item = Token;

    /// Produce the next complete token, or `None` when the buffered
    /// input is exhausted or ends in an unterminated escape sequence.
    /// Iteration is restartable: feed more input and call again.
    fn next(&mut self) -> Option<Token> {
        while let Some(ch) = self.input.pop_front() {
            if matches!(ch, NL | CR | BS | BEL) {
                // Controls split any run in progress; the control itself
                // is re-queued and delivered on the next call
                if !self.seq.is_empty() {
                    self.input.push_front(ch);
                    return Some(self.take_seq());
                }
                return Some(Token::Control(ch));
            }

            if ch == ESC {
                // A new introducer flushes whatever was accumulating,
                // complete or not
                if !self.seq.is_empty() {
                    let token = self.take_seq();
                    self.seq.push(ESC);
                    return Some(token);
                }
                self.seq.push(ESC);
                continue;
            }

            self.seq.push(ch);

            if self.seq.starts_with(ESC) {
                if is_terminated(&self.seq) {
                    return Some(self.take_seq());
                }
                if self.seq.chars().count() > MAX_PENDING_SEQUENCE {
                    warn!(
                        seq = %ascii::readable(&self.seq),
                        "unterminated sequence exceeded cap, flushing"
                    );
                    return Some(self.take_seq());
                }
            }
        }

        // Buffer exhausted: a text run is complete by definition, an
        // unterminated escape sequence is held for the next feed
        if self.seq.is_empty() {
            return None;
        }
        if self.seq.starts_with(ESC) {
            trace!(seq = %ascii::readable(&self.seq), "holding partial sequence");
            return None;
        }
        Some(self.take_seq())
    }
}
