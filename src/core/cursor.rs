//! Cursor state
//!
//! A 1-based (row, column) position clamped to the configured bounds.
//! Save/restore slots live on the screen; the cursor itself only knows
//! how to move.

use serde::{Deserialize, Serialize};

/// 1-based cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub row: usize,
    pub col: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self { row: 1, col: 1 }
    }
}

impl Cursor {
    /// Home position (1, 1)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an absolute position, clamped to [1, rows] x [1, cols]
    pub fn move_to(&mut self, row: usize, col: usize, rows: usize, cols: usize) {
        self.row = row.clamp(1, rows.max(1));
        self.col = col.clamp(1, cols.max(1));
    }

    /// Move up by n rows, stopping at row 1
    pub fn move_up(&mut self, n: usize) {
        self.row = self.row.saturating_sub(n).max(1);
    }

    /// Move down by n rows, stopping at the last row
    pub fn move_down(&mut self, n: usize, rows: usize) {
        self.row = self.row.saturating_add(n).min(rows.max(1));
    }

    /// Move left by n columns, stopping at column 1 (no wrap)
    pub fn move_left(&mut self, n: usize) {
        self.col = self.col.saturating_sub(n).max(1);
    }

    /// Move right by n columns, stopping at the last column
    pub fn move_right(&mut self, n: usize, cols: usize) {
        self.col = self.col.saturating_add(n).min(cols.max(1));
    }

    /// Set the column, clamped to [1, cols]
    pub fn set_col(&mut self, col: usize, cols: usize) {
        self.col = col.clamp(1, cols.max(1));
    }

    /// Move to column 1
    pub fn carriage_return(&mut self) {
        self.col = 1;
    }

    /// Clamp into new bounds after a resize
    pub fn clamp(&mut self, rows: usize, cols: usize) {
        self.row = self.row.clamp(1, rows.max(1));
        self.col = self.col.clamp(1, cols.max(1));
    }
}
