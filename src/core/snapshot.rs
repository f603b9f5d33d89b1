//! Deterministic state snapshots
//!
//! A snapshot captures the grid content, cursor and attribute state in a
//! serializable form. Given the same byte stream, the terminal must
//! produce identical snapshots, which is what the golden-style tests and
//! the headless runner lean on. Row identity and dirty flags are not part
//! of a snapshot, so snapshots compare equal across resets.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::attrs::Attributes;
use super::cell::Cell;
use super::cursor::Cursor;
use super::screen::Screen;

/// Errors from the snapshot file boundary
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// A complete snapshot of the visible terminal state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Grid dimensions
    pub rows: usize,
    pub cols: usize,
    /// Cell grid, top row first
    pub grid: Vec<Vec<Cell>>,
    /// Cursor position
    pub cursor: Cursor,
    /// Attribute state active for the next written character
    pub attrs: Attributes,
}

impl Snapshot {
    /// Capture the current screen state
    pub fn from_screen(screen: &Screen) -> Self {
        let grid = (1..=screen.rows())
            .map(|row| {
                screen
                    .line(row)
                    .map(|line| line.cells().to_vec())
                    .unwrap_or_default()
            })
            .collect();

        Snapshot {
            rows: screen.rows(),
            cols: screen.cols(),
            grid,
            cursor: screen.cursor(),
            attrs: screen.attrs(),
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the snapshot to a file as JSON
    pub fn save_to(&self, path: &Path) -> Result<(), SnapshotError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load a snapshot from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, SnapshotError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Plain-text rendering of the grid, trailing spaces trimmed
    pub fn to_text(&self) -> String {
        let mut result = String::new();
        for row in &self.grid {
            let mut text: String = row.iter().map(|c| c.ch).collect();
            while text.ends_with(' ') {
                text.pop();
            }
            result.push_str(&text);
            result.push('\n');
        }
        result
    }

    /// Compare grid content and cursor, ignoring anything else
    pub fn content_equals(&self, other: &Snapshot) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self.cursor == other.cursor
            && self.grid == other.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_from_screen() {
        let mut screen = Screen::new(3, 10);
        screen.append_text("Hi");

        let snapshot = Snapshot::from_screen(&screen);
        assert_eq!(snapshot.rows, 3);
        assert_eq!(snapshot.cols, 10);
        assert_eq!(snapshot.grid[0][0].ch, 'H');
        assert_eq!(snapshot.grid[0][1].ch, 'i');
        assert_eq!(snapshot.cursor.col, 3);
    }

    #[test]
    fn test_snapshot_to_text() {
        let mut screen = Screen::new(3, 10);
        screen.append_text("AB");
        screen.linefeed();
        screen.append_text("C");

        let text = Snapshot::from_screen(&screen).to_text();
        assert_eq!(text, "AB\nC\n\n");
    }

    #[test]
    fn test_snapshot_json_roundtrip() {
        let mut screen = Screen::new(2, 5);
        screen.apply_sgr(&[crate::core::attrs::SgrOp::Bold]);
        screen.append_text("X");

        let snapshot = Snapshot::from_screen(&screen);
        let json = snapshot.to_json().expect("serialize");
        let restored = Snapshot::from_json(&json).expect("parse");
        assert!(snapshot.content_equals(&restored));
        assert_eq!(snapshot, restored);
    }

    #[test]
    fn test_snapshot_ignores_line_ids() {
        let mut a = Screen::new(2, 5);
        let mut b = Screen::new(2, 5);
        // Scroll b a few times so its line ids differ from a's
        for _ in 0..5 {
            b.linefeed();
        }
        b.reset();
        a.append_text("same");
        b.append_text("same");

        let sa = Snapshot::from_screen(&a);
        let sb = Snapshot::from_screen(&b);
        assert!(sa.content_equals(&sb));
    }
}
