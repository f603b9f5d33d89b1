//! Attribute state
//!
//! The set of style flags and colors active when a character is written.
//! Cells copy the state by value, so later changes never retroactively
//! restyle already-written cells. Transitions are expressed as a pure
//! `apply` over discrete [`SgrOp`]s, which keeps every rule independently
//! testable.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::palette::{self, AnsiColor};

/// A foreground or background color value.
///
/// Colors are resolved to concrete RGB at the moment an SGR op is applied,
/// so a cell's snapshot never depends on a palette lookup at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Color {
    /// The terminal's default foreground or background
    #[default]
    Default,
    /// 24-bit RGB color
    Rgb(u8, u8, u8),
}

impl Color {
    /// Resolve to RGB, substituting the theme defaults for `Default`.
    pub fn to_rgb(&self, is_foreground: bool) -> (u8, u8, u8) {
        match self {
            Color::Default => {
                if is_foreground {
                    palette::DEFAULT_FOREGROUND
                } else {
                    palette::DEFAULT_BACKGROUND
                }
            }
            Color::Rgb(r, g, b) => (*r, *g, *b),
        }
    }
}

/// A single decoded "select graphic rendition" operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SgrOp {
    /// Reset all flags and colors to default (SGR 0 or an empty field)
    Reset,
    /// SGR 1
    Bold,
    /// SGR 2
    Dim,
    /// SGR 3
    Italic,
    /// SGR 4
    Underline,
    /// SGR 5
    SlowBlink,
    /// SGR 6
    RapidBlink,
    /// SGR 7
    Reverse,
    /// SGR 9
    Crossed,
    /// SGR 22 clears both bold and dim
    NormalIntensity,
    /// SGR 23
    NotItalic,
    /// SGR 24
    NotUnderlined,
    /// SGR 25 clears both blink speeds
    NotBlinking,
    /// SGR 27
    NotReversed,
    /// SGR 29
    NotCrossed,
    /// SGR 53
    Overline,
    /// SGR 55
    NotOverline,
    /// SGR 73
    Superscript,
    /// SGR 74
    Subscript,
    /// SGR 30-37
    Foreground(AnsiColor),
    /// SGR 40-47
    Background(AnsiColor),
    /// SGR 39
    DefaultForeground,
    /// SGR 49
    DefaultBackground,
    /// SGR 38;5;n
    ForegroundIndexed(u8),
    /// SGR 48;5;n
    BackgroundIndexed(u8),
    /// SGR 38;2;r;g;b - decoded but deliberately not applied
    ForegroundRgb(u8, u8, u8),
    /// SGR 48;2;r;g;b - decoded but deliberately not applied
    BackgroundRgb(u8, u8, u8),
    /// A numeric code with no mapping; applying it changes nothing
    Unsupported(u16),
}

/// Text style flags plus the active colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Attributes {
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
    pub blink_slow: bool,
    pub blink_fast: bool,
    pub reverse: bool,
    pub crossed: bool,
    pub overline: bool,
    pub superscript: bool,
    pub subscript: bool,
    pub fg: Color,
    pub bg: Color,
}

impl Attributes {
    /// Reset to the default state (no flags, default colors).
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply one SGR operation, producing the next attribute state.
    pub fn apply(mut self, op: SgrOp) -> Attributes {
        match op {
            SgrOp::Reset => self = Attributes::default(),
            SgrOp::Bold => self.bold = true,
            SgrOp::Dim => self.dim = true,
            SgrOp::Italic => self.italic = true,
            SgrOp::Underline => self.underline = true,
            SgrOp::SlowBlink => self.blink_slow = true,
            SgrOp::RapidBlink => self.blink_fast = true,
            SgrOp::Reverse => self.reverse = true,
            SgrOp::Crossed => self.crossed = true,
            SgrOp::NormalIntensity => {
                self.bold = false;
                self.dim = false;
            }
            SgrOp::NotItalic => self.italic = false,
            SgrOp::NotUnderlined => self.underline = false,
            SgrOp::NotBlinking => {
                self.blink_slow = false;
                self.blink_fast = false;
            }
            SgrOp::NotReversed => self.reverse = false,
            SgrOp::NotCrossed => self.crossed = false,
            // Overline displaces the other line decorations
            SgrOp::Overline => {
                self.overline = true;
                self.underline = false;
                self.crossed = false;
            }
            SgrOp::NotOverline => self.overline = false,
            SgrOp::Superscript => self.superscript = true,
            SgrOp::Subscript => self.subscript = true,
            // Bold intensity selects the bright row of the theme
            SgrOp::Foreground(c) => self.fg = palette::ansi(c, self.bold),
            SgrOp::Background(c) => self.bg = palette::ansi(c, false),
            SgrOp::DefaultForeground => self.fg = Color::Default,
            SgrOp::DefaultBackground => self.bg = Color::Default,
            SgrOp::ForegroundIndexed(i) => self.fg = palette::indexed(i),
            SgrOp::BackgroundIndexed(i) => self.bg = palette::indexed(i),
            SgrOp::ForegroundRgb(..) | SgrOp::BackgroundRgb(..) => {
                // Truecolor selection is recognized but not applied
                debug!(?op, "truecolor selection ignored");
            }
            SgrOp::Unsupported(code) => {
                debug!(code, "unsupported SGR code ignored");
            }
        }
        self
    }

    /// Fold a decoded SGR operation list into this state.
    pub fn apply_all(self, ops: &[SgrOp]) -> Attributes {
        ops.iter().fold(self, |attrs, &op| attrs.apply(op))
    }
}
