//! Terminal cell
//!
//! One displayed character plus the attribute state that was active when
//! it was written.

use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

use super::attrs::Attributes;

/// A single cell in the terminal grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// The character in this cell
    pub ch: char,
    /// Attribute snapshot copied at write time
    pub attrs: Attributes,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            attrs: Attributes::default(),
        }
    }
}

impl Cell {
    /// Create a cell with the given character and attributes
    pub fn new(ch: char, attrs: Attributes) -> Self {
        Self { ch, attrs }
    }

    /// Create a blank (space) cell carrying the given attributes
    pub fn blank(attrs: Attributes) -> Self {
        Self { ch: ' ', attrs }
    }

    /// Display width of the cell's character
    pub fn width(&self) -> usize {
        self.ch.width().unwrap_or(0)
    }

    /// Check if the cell holds a space
    pub fn is_blank(&self) -> bool {
        self.ch == ' '
    }

    /// Replace the content with a space carrying the given attributes
    pub fn erase(&mut self, attrs: Attributes) {
        self.ch = ' ';
        self.attrs = attrs;
    }
}
