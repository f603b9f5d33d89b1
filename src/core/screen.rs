//! Screen model
//!
//! The visible grid of lines plus the cursor, the active attribute state
//! and the save/restore slots. Lines are stored most-recent-first: index 0
//! is the bottom row of the display and index `rows - 1` the top row, so
//! scrolling is a push at the front and a discard at the back. Rows keep
//! their identity across insert/delete shifts; only a scroll brings in a
//! line with a fresh id.
//!
//! All mutation is command-driven through the methods here; nothing
//! outside this module touches the grid directly.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::attrs::{Attributes, SgrOp};
use super::cursor::Cursor;
use super::line::{EraseMode, Line};

/// Default grid height
pub const DEFAULT_ROWS: usize = 24;
/// Default grid width
pub const DEFAULT_COLS: usize = 80;

/// A changed row handed to the render layer by [`Screen::drain_changes`].
#[derive(Debug)]
pub struct RowUpdate<'a> {
    /// 1-based row number, counted from the top of the display
    pub row: usize,
    /// The line content
    pub line: &'a Line,
    /// 1-based cursor column when the cursor sits on this row
    pub cursor_col: Option<usize>,
}

/// The terminal screen: grid, cursor and attribute state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    rows: usize,
    cols: usize,
    /// Grid lines, most recent (bottom of display) at index 0
    lines: VecDeque<Line>,
    cursor: Cursor,
    attrs: Attributes,
    saved_cursor: Cursor,
    saved_attrs: Attributes,
    /// Identity source for lines, monotonic over the buffer lifetime
    next_line_id: u64,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

impl Screen {
    /// Create a screen with the given bounds (minimum 1x1)
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut screen = Self {
            rows: rows.max(1),
            cols: cols.max(1),
            lines: VecDeque::new(),
            cursor: Cursor::default(),
            attrs: Attributes::default(),
            saved_cursor: Cursor::default(),
            saved_attrs: Attributes::default(),
            next_line_id: 0,
        };
        screen.rebuild_grid();
        screen
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Current cursor position
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// The attribute state applied to subsequently written text
    pub fn attrs(&self) -> Attributes {
        self.attrs
    }

    /// Get a line by 1-based row number (1 = top of display)
    pub fn line(&self, row: usize) -> Option<&Line> {
        if row == 0 || row > self.rows {
            return None;
        }
        self.lines.get(self.rows - row)
    }

    fn line_index(&self, row: usize) -> usize {
        self.rows - row
    }

    fn cursor_line_mut(&mut self) -> &mut Line {
        let idx = self.line_index(self.cursor.row);
        &mut self.lines[idx]
    }

    fn alloc_line(&mut self) -> Line {
        let id = self.next_line_id;
        self.next_line_id += 1;
        Line::new(self.cols, self.attrs, id)
    }

    fn rebuild_grid(&mut self) {
        self.lines.clear();
        for _ in 0..self.rows {
            let line = self.alloc_line();
            self.lines.push_front(line);
        }
    }

    /// Scroll: bring in a fresh bottom row, discarding the top row
    pub fn append_new_row(&mut self) {
        let line = self.alloc_line();
        self.lines.push_front(line);
        while self.lines.len() > self.rows {
            self.lines.pop_back();
        }
    }

    /// Write a run of text at the cursor, advancing the column. Writing
    /// past the right edge overwrites the last column; the cursor stays
    /// inside the bounds.
    pub fn append_text(&mut self, text: &str) {
        let attrs = self.attrs;
        let col = self.cursor.col;
        let cols = self.cols;
        let next = self.cursor_line_mut().write_run(text, col, attrs, cols);
        self.cursor.set_col(next, self.cols);
    }

    /// Line feed: advance a row, scrolling at the bottom; column resets to 1
    pub fn linefeed(&mut self) {
        if self.cursor.row >= self.rows {
            self.append_new_row();
        }
        self.cursor.move_down(1, self.rows);
        self.cursor.carriage_return();
    }

    /// Carriage return: column 1, same row
    pub fn carriage_return(&mut self) {
        self.cursor.carriage_return();
    }

    /// Backspace: one column left, stopping at column 1 (no wrap)
    pub fn backspace(&mut self) {
        self.cursor.move_left(1);
    }

    pub fn cursor_up(&mut self, n: usize) {
        self.cursor.move_up(n);
    }

    pub fn cursor_down(&mut self, n: usize) {
        self.cursor.move_down(n, self.rows);
    }

    pub fn cursor_forward(&mut self, n: usize) {
        self.cursor.move_right(n, self.cols);
    }

    pub fn cursor_back(&mut self, n: usize) {
        self.cursor.move_left(n);
    }

    /// Move to column 1 of the row n below
    pub fn cursor_next_line(&mut self, n: usize) {
        self.cursor.move_down(n, self.rows);
        self.cursor.carriage_return();
    }

    /// Move to column 1 of the row n above
    pub fn cursor_prev_line(&mut self, n: usize) {
        self.cursor.move_up(n);
        self.cursor.carriage_return();
    }

    /// Absolute positioning, clamped to bounds
    pub fn cursor_position(&mut self, row: usize, col: usize) {
        self.cursor.move_to(row, col, self.rows, self.cols);
    }

    /// Erase within the cursor row
    pub fn erase_in_line(&mut self, mode: EraseMode) {
        let attrs = self.attrs;
        let col = self.cursor.col;
        let cols = self.cols;
        self.cursor_line_mut().erase(mode, col, attrs, cols);
    }

    /// Erase rows of the display by whole-line erasure: mode 0 clears the
    /// cursor row and everything below it, mode 1 everything strictly
    /// above it, mode 2 every visible row.
    pub fn erase_in_display(&mut self, mode: EraseMode) {
        let range = match mode {
            EraseMode::ToEnd => self.cursor.row..=self.rows,
            EraseMode::ToStart => 1..=self.cursor.row.saturating_sub(1),
            EraseMode::All => 1..=self.rows,
        };
        let attrs = self.attrs;
        let cols = self.cols;
        for row in range {
            let idx = self.line_index(row);
            self.lines[idx].erase(EraseMode::All, 1, attrs, cols);
        }
    }

    /// Insert n blank rows at the cursor row, shifting the cursor row and
    /// everything below it down; rows pushed past the bottom are lost.
    /// Row identities stay with their physical positions.
    pub fn insert_lines(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let n = n.min(self.rows);
        let ci = self.line_index(self.cursor.row);
        let attrs = self.attrs;
        let cols = self.cols;
        for i in 0..=ci {
            if i + n <= ci {
                let cells = self.lines[i + n].take_cells();
                self.lines[i].set_cells(cells);
            } else {
                self.lines[i].erase(EraseMode::All, 1, attrs, cols);
            }
        }
    }

    /// Delete n rows at the cursor row, shifting the rows below up and
    /// pulling blank rows in at the bottom.
    pub fn delete_lines(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let n = n.min(self.rows);
        let ci = self.line_index(self.cursor.row);
        let attrs = self.attrs;
        let cols = self.cols;
        let mut i = ci;
        while i >= n {
            let cells = self.lines[i - n].take_cells();
            self.lines[i].set_cells(cells);
            i -= 1;
        }
        for i in 0..n.min(ci + 1) {
            self.lines[i].erase(EraseMode::All, 1, attrs, cols);
        }
    }

    /// Delete n characters at the cursor column, shifting the rest of the
    /// row left. The row stays shortened until refilled.
    pub fn delete_chars(&mut self, n: usize) {
        let col = self.cursor.col;
        self.cursor_line_mut().delete_chars(col, n);
    }

    /// Fold a decoded SGR operation list into the current attribute state
    pub fn apply_sgr(&mut self, ops: &[SgrOp]) {
        self.attrs = self.attrs.apply_all(ops);
    }

    /// Copy the cursor (and optionally the attribute state) into the
    /// saved slot
    pub fn save_cursor(&mut self, with_attributes: bool) {
        self.saved_cursor = self.cursor;
        if with_attributes {
            self.saved_attrs = self.attrs;
        }
    }

    /// Restore the cursor (and optionally the attribute state) from the
    /// saved slot. Before any save the slot holds the initial state, so
    /// restoring is always safe.
    pub fn restore_cursor(&mut self, with_attributes: bool) {
        self.cursor = self.saved_cursor;
        self.cursor.clamp(self.rows, self.cols);
        if with_attributes {
            self.attrs = self.saved_attrs;
        }
    }

    /// Return the rows changed since the last drain, top to bottom, with
    /// the cursor-bearing row flagged for the cursor overlay. Rows not
    /// returned are unchanged and need no redraw.
    pub fn drain_changes(&mut self) -> Vec<RowUpdate<'_>> {
        let mut changed = Vec::new();
        for row in 1..=self.rows {
            let idx = self.line_index(row);
            if self.lines[idx].is_dirty() {
                self.lines[idx].clear_dirty();
                changed.push(row);
            }
        }
        let cursor = self.cursor;
        changed
            .into_iter()
            .map(|row| RowUpdate {
                row,
                line: &self.lines[self.rows - row],
                cursor_col: (cursor.row == row).then_some(cursor.col),
            })
            .collect()
    }

    /// Return to the initial state: fresh grid, home cursor, default
    /// attributes and saved slots. Line ids keep counting up.
    pub fn reset(&mut self) {
        self.attrs = Attributes::default();
        self.cursor = Cursor::default();
        self.saved_cursor = Cursor::default();
        self.saved_attrs = Attributes::default();
        self.rebuild_grid();
    }

    /// Change the grid bounds (minimum 1x1). The grid is rebuilt blank,
    /// the cursor homed and the saved slot cleared; the attribute state
    /// is kept.
    pub fn set_dimensions(&mut self, rows: usize, cols: usize) {
        debug!(rows, cols, "screen resized");
        self.rows = rows.max(1);
        self.cols = cols.max(1);
        self.cursor = Cursor::default();
        self.saved_cursor = Cursor::default();
        self.saved_attrs = Attributes::default();
        self.rebuild_grid();
    }

    /// Plain-text projection of the grid, one string per row, top first
    pub fn to_text(&self) -> Vec<String> {
        (1..=self.rows)
            .map(|row| self.lines[self.line_index(row)].text())
            .collect()
    }
}
