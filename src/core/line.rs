//! Terminal line representation
//!
//! A line is one row of cells in the grid, carrying an identity id and a
//! dirty flag. The id is monotonically increasing over the buffer's
//! lifetime and lets a consumer tell a scrolled copy of a physical row
//! apart from a freshly scrolled-in row. The dirty flag is set by every
//! mutation and cleared when a consumer drains changes.

use serde::{Deserialize, Serialize};
use tracing::trace;
use unicode_width::UnicodeWidthChar;

use super::attrs::Attributes;
use super::cell::Cell;

/// Region selector for erase operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EraseMode {
    /// From the cursor to the end of the line/display (mode 0)
    ToEnd,
    /// From the start of the line/display up to the cursor (mode 1)
    ToStart,
    /// The entire line/display (mode 2)
    All,
}

impl EraseMode {
    /// Map a numeric erase parameter; out-of-range values fall back to 0.
    pub fn from_param(param: usize) -> EraseMode {
        match param {
            1 => EraseMode::ToStart,
            2 => EraseMode::All,
            _ => EraseMode::ToEnd,
        }
    }
}

/// A row of cells in the terminal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// The cells in this line
    cells: Vec<Cell>,
    /// Identity of the physical row, unique over the buffer lifetime
    id: u64,
    /// Set by any mutation, cleared when changes are drained
    dirty: bool,
}

impl Line {
    /// Create a blank line of `cols` cells carrying the given attributes
    pub fn new(cols: usize, attrs: Attributes, id: u64) -> Self {
        Self {
            cells: vec![Cell::blank(attrs); cols],
            id,
            dirty: true,
        }
    }

    /// Number of cells currently in this line.
    ///
    /// Normally equal to the configured column count; a
    /// delete-characters operation shrinks the row until the next erase
    /// or overwrite restores the nominal width.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when the line holds no cells (only possible transiently,
    /// after deleting every character of a shortened row)
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row identity
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether this line changed since changes were last drained
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Get the cell at a 0-indexed column
    pub fn cell(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }

    /// All cells, left to right
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Replace this line's cells wholesale, keeping the row identity.
    /// Used when rows shift for insert/delete-line operations.
    pub(crate) fn set_cells(&mut self, cells: Vec<Cell>) {
        self.cells = cells;
        self.dirty = true;
    }

    pub(crate) fn take_cells(&mut self) -> Vec<Cell> {
        std::mem::take(&mut self.cells)
    }

    /// Write a run of text at a 1-based column, overwriting existing
    /// cells. Returns the 1-based column where the next write lands.
    ///
    /// Writes are clamped at the right edge: once the run reaches the
    /// last column, further characters overwrite it and the returned
    /// column stays at `cols`. The clamp keeps the cursor inside the
    /// bounds and makes a run land identically however the input stream
    /// is chunked.
    ///
    /// Zero-width characters (combining marks) do not occupy a cell and
    /// are skipped.
    pub fn write_run(&mut self, text: &str, col: usize, attrs: Attributes, cols: usize) -> usize {
        let cols = cols.max(1);
        let mut col = col.clamp(1, cols);
        let mut wrote = false;
        for ch in text.chars() {
            // Combining marks take no cell; control characters that reach
            // a text run (tab included) land in a cell like the rest
            if ch.width() == Some(0) {
                trace!(?ch, "skipping zero-width character");
                continue;
            }
            let idx = col - 1;
            // Refill a shortened row up to the write position
            while self.cells.len() <= idx {
                self.cells.push(Cell::blank(attrs));
            }
            self.cells[idx] = Cell::new(ch, attrs);
            if col < cols {
                col += 1;
            }
            wrote = true;
        }
        if wrote {
            self.dirty = true;
        }
        col
    }

    /// Erase part of the line relative to a 1-based cursor column,
    /// replacing cells with spaces carrying the given attributes.
    /// `cols` is the configured width; erasing to the end or the whole
    /// line restores the row to exactly that width.
    pub fn erase(&mut self, mode: EraseMode, col: usize, attrs: Attributes, cols: usize) {
        match mode {
            EraseMode::ToEnd => {
                let start = col.saturating_sub(1);
                if start < cols {
                    self.cells.resize(cols, Cell::blank(attrs));
                }
                for cell in self.cells.iter_mut().skip(start) {
                    cell.erase(attrs);
                }
            }
            EraseMode::ToStart => {
                let end = col.min(self.cells.len());
                for cell in self.cells.iter_mut().take(end) {
                    cell.erase(attrs);
                }
            }
            EraseMode::All => {
                self.cells.clear();
                self.cells.resize(cols, Cell::blank(attrs));
            }
        }
        self.dirty = true;
    }

    /// Delete `n` cells at a 1-based column, shifting the remainder left.
    /// The row shortens; it is refilled by the next erase or overwrite.
    pub fn delete_chars(&mut self, col: usize, n: usize) {
        let start = col.saturating_sub(1);
        if start >= self.cells.len() || n == 0 {
            return;
        }
        let n = n.min(self.cells.len() - start);
        self.cells.drain(start..start + n);
        self.dirty = true;
    }

    /// The text content of the line, trailing spaces trimmed
    pub fn text(&self) -> String {
        let mut result: String = self.cells.iter().map(|c| c.ch).collect();
        while result.ends_with(' ') {
            result.pop();
        }
        result
    }
}
