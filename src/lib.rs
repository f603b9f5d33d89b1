//! vtgrid
//!
//! A terminal-emulation core: a streaming ANSI/VT100 escape parser
//! feeding a persistent, styled character grid that supports incremental
//! re-rendering. The crate implements a deliberately partial escape
//! subset the way tolerant terminals do: best-effort forward progress,
//! never an error.
//!
//! - `parser`: tokenizer and escape/SGR decoding, with partial sequences
//!   held across arbitrarily split input chunks
//! - `core`: cells, lines, cursor, attribute state and the screen grid
//! - `render`: projection of lines into merged styled runs
//! - `terminal`: the integration point tying it all together
//!
//! ```
//! use vtgrid::Terminal;
//!
//! let mut term = Terminal::new();
//! let changed = term.update_str("\x1b[1;31mhello\x1b[0m");
//! assert_eq!(changed[0].line.text(), "hello");
//! ```

pub mod core;
pub mod parser;
pub mod render;
pub mod terminal;

pub use crate::core::{Screen, Snapshot};
pub use terminal::Terminal;
