//! Static color tables
//!
//! The sixteen-color theme used for the standard SGR color codes, and the
//! xterm 256-color palette (16 system colors, 6x6x6 cube, grayscale ramp).
//! All tables are immutable process-wide data; nothing mutates them at
//! runtime.

use serde::{Deserialize, Serialize};

use super::attrs::Color;

/// One of the eight standard ANSI colors selected by SGR 30-37 / 40-47.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl AnsiColor {
    /// Map the low digit of an SGR color code (30-37 or 40-47) to a color.
    pub fn from_code_digit(digit: u16) -> Option<AnsiColor> {
        match digit {
            0 => Some(AnsiColor::Black),
            1 => Some(AnsiColor::Red),
            2 => Some(AnsiColor::Green),
            3 => Some(AnsiColor::Yellow),
            4 => Some(AnsiColor::Blue),
            5 => Some(AnsiColor::Magenta),
            6 => Some(AnsiColor::Cyan),
            7 => Some(AnsiColor::White),
            _ => None,
        }
    }
}

/// Theme values for the normal-intensity row of the sixteen-color table.
const THEME_NORMAL: [(u8, u8, u8); 8] = [
    (0x00, 0x00, 0x00), // black
    (0xcc, 0x00, 0x00), // red
    (0x4e, 0x9a, 0x06), // green
    (0xc4, 0xa0, 0x00), // yellow
    (0x34, 0x65, 0xa4), // blue
    (0x75, 0x50, 0x7b), // magenta
    (0x06, 0x98, 0x9a), // cyan
    (0xd3, 0xd7, 0xcf), // white
];

/// Theme values for the bright row, used for foregrounds under bold.
const THEME_BRIGHT: [(u8, u8, u8); 8] = [
    (0x55, 0x57, 0x53),
    (0xef, 0x29, 0x29),
    (0x8a, 0xe2, 0x34),
    (0xfc, 0xe9, 0x4f),
    (0x72, 0x9f, 0xcf),
    (0xad, 0x7f, 0xa8),
    (0x34, 0xe2, 0xe2),
    (0xee, 0xee, 0xec),
];

/// Default foreground when no color is selected (theme white).
pub const DEFAULT_FOREGROUND: (u8, u8, u8) = THEME_NORMAL[7];
/// Default background when no color is selected (theme black).
pub const DEFAULT_BACKGROUND: (u8, u8, u8) = THEME_NORMAL[0];

/// Resolve a standard ANSI color against the theme.
pub fn ansi(color: AnsiColor, bright: bool) -> Color {
    let table = if bright { &THEME_BRIGHT } else { &THEME_NORMAL };
    let (r, g, b) = table[color as usize];
    Color::Rgb(r, g, b)
}

/// Resolve a 256-color palette index.
///
/// Indices 0-15 are the system colors, 16-231 the 6x6x6 color cube with
/// levels 0x00/0x5f/0x87/0xaf/0xd7/0xff, and 232-255 the 24-step grayscale
/// ramp.
pub fn indexed(index: u8) -> Color {
    let (r, g, b) = match index {
        0 => (0x00, 0x00, 0x00),
        1 => (0x80, 0x00, 0x00),
        2 => (0x00, 0x80, 0x00),
        3 => (0x80, 0x80, 0x00),
        4 => (0x00, 0x00, 0x80),
        5 => (0x80, 0x00, 0x80),
        6 => (0x00, 0x80, 0x80),
        7 => (0xc0, 0xc0, 0xc0),
        8 => (0x80, 0x80, 0x80),
        9 => (0xff, 0x00, 0x00),
        10 => (0x00, 0xff, 0x00),
        11 => (0xff, 0xff, 0x00),
        12 => (0x00, 0x00, 0xff),
        13 => (0xff, 0x00, 0xff),
        14 => (0x00, 0xff, 0xff),
        15 => (0xff, 0xff, 0xff),
        16..=231 => {
            let n = index - 16;
            let r = n / 36;
            let g = (n % 36) / 6;
            let b = n % 6;
            let level = |v: u8| if v == 0 { 0 } else { 0x37 + v * 0x28 };
            (level(r), level(g), level(b))
        }
        232..=255 => {
            let gray = 8 + (index - 232) * 10;
            (gray, gray, gray)
        }
    };
    Color::Rgb(r, g, b)
}
