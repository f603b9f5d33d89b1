//! Escape-sequence decoding
//!
//! Classifies one complete escape token into a [`Command`]. Parameters
//! are split on `;` or `:`; for cursor and editing commands empty fields
//! are dropped and a missing count defaults to 1, while the erase
//! commands default their mode to 0. Unknown terminators decode to
//! [`Command::Unsupported`], which mutates nothing downstream but stays
//! visible to diagnostics.
//!
//! Save/restore exists in two syntaxes with one meaning: the two-byte
//! private forms `ESC 7`/`ESC 8` (which also carry the attribute state)
//! and CSI `s`/`u` (cursor position only).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::attrs::SgrOp;
use crate::core::line::EraseMode;

use super::ascii::{self, ESC};
use super::sgr;

/// A fully decoded terminal command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    CursorUp(usize),
    CursorDown(usize),
    CursorForward(usize),
    CursorBack(usize),
    /// Move to column 1, n rows down
    CursorNextLine(usize),
    /// Move to column 1, n rows up
    CursorPrevLine(usize),
    /// Absolute horizontal position; decoded but not applied
    CursorColumn(usize),
    /// Absolute positioning (CUP, and the HVP `f` variant)
    CursorPosition { row: usize, col: usize },
    EraseInDisplay(EraseMode),
    EraseInLine(EraseMode),
    InsertLines(usize),
    DeleteLines(usize),
    DeleteChars(usize),
    /// Decoded but not applied
    ScrollUp(usize),
    /// Decoded but not applied
    ScrollDown(usize),
    /// `with_attributes` is true for the `ESC 7` form
    SaveCursor { with_attributes: bool },
    /// `with_attributes` is true for the `ESC 8` form
    RestoreCursor { with_attributes: bool },
    /// Acknowledged and ignored; scroll regions are unimplemented
    SetScrollRegion,
    SelectGraphics(Vec<SgrOp>),
    /// Recognized introducer with an unrecognized body or terminator
    Unsupported,
}

/// Decode one complete escape token into a command.
///
/// Deterministic: the same sequence always yields the same command.
pub fn decode(seq: &str) -> Command {
    let mut chars = seq.chars();
    if chars.next() != Some(ESC) {
        return Command::Unsupported;
    }
    let command = match chars.next() {
        Some('7') => Command::SaveCursor {
            with_attributes: true,
        },
        Some('8') => Command::RestoreCursor {
            with_attributes: true,
        },
        Some('[') => decode_csi(seq),
        _ => Command::Unsupported,
    };

    if command == Command::Unsupported {
        debug!(seq = %ascii::readable(seq), "unsupported sequence");
    }
    command
}

fn decode_csi(seq: &str) -> Command {
    let Some(terminator) = seq.chars().last() else {
        return Command::Unsupported;
    };
    // Parameter bytes sit between "ESC [" and the terminator
    let body: String = seq.chars().skip(2).collect();
    let body = &body[..body.len().saturating_sub(terminator.len_utf8())];
    // Both separators split parameters
    let body = body.replace(':', ";");
    let fields: Vec<&str> = body.split(';').collect();

    if terminator == 'm' {
        return Command::SelectGraphics(sgr::decode_params(&fields));
    }

    // Empty and malformed fields are dropped for the non-SGR commands
    let params: Vec<usize> = fields.iter().filter_map(|f| f.parse().ok()).collect();
    let n = |default: usize| params.first().copied().unwrap_or(default);
    let m = params.get(1).copied().unwrap_or(1);

    match terminator {
        'A' => Command::CursorUp(n(1)),
        'B' => Command::CursorDown(n(1)),
        'C' => Command::CursorForward(n(1)),
        'D' => Command::CursorBack(n(1)),
        'E' => Command::CursorNextLine(n(1)),
        'F' => Command::CursorPrevLine(n(1)),
        'G' => Command::CursorColumn(n(1)),
        'H' | 'f' => Command::CursorPosition { row: n(1), col: m },
        'J' => Command::EraseInDisplay(EraseMode::from_param(n(0))),
        'K' => Command::EraseInLine(EraseMode::from_param(n(0))),
        'L' => Command::InsertLines(n(1)),
        'M' => Command::DeleteLines(n(1)),
        'P' => Command::DeleteChars(n(1)),
        'S' => Command::ScrollUp(n(1)),
        'T' => Command::ScrollDown(n(1)),
        'r' => Command::SetScrollRegion,
        's' => Command::SaveCursor {
            with_attributes: false,
        },
        'u' => Command::RestoreCursor {
            with_attributes: false,
        },
        _ => Command::Unsupported,
    }
}
