//! Core screen model
//!
//! - `attrs`: style flags, colors and the SGR transition function
//! - `palette`: static 16-color theme and 256-color tables
//! - `cell` / `line`: the styled grid storage with change tracking
//! - `cursor`: 1-based, clamped cursor position
//! - `screen`: the grid plus cursor/attribute state and all mutation ops
//! - `snapshot`: serializable full-state captures for tests and tooling

pub mod attrs;
pub mod cell;
pub mod cursor;
pub mod line;
pub mod palette;
pub mod screen;
pub mod snapshot;

pub use attrs::{Attributes, Color, SgrOp};
pub use cell::Cell;
pub use cursor::Cursor;
pub use line::{EraseMode, Line};
pub use palette::AnsiColor;
pub use screen::{RowUpdate, Screen, DEFAULT_COLS, DEFAULT_ROWS};
pub use snapshot::{Snapshot, SnapshotError};
